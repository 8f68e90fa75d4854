//! Deterministic fallback citation assignment.

/// Assigns evidence ids round-robin when a text unit ends up with zero
/// valid citations after validation.
///
/// One assigner is shared across a whole draft so consecutive fallback
/// units cycle through the pack instead of all citing the first item.
/// `was_used` drives the draft-level risk flag.
#[derive(Debug)]
pub struct FallbackAssigner {
    available: Vec<String>,
    cursor: usize,
    used: bool,
}

impl FallbackAssigner {
    pub fn new(available: Vec<String>) -> Self {
        Self {
            available,
            cursor: 0,
            used: false,
        }
    }

    /// Take the next `count` ids, cycling over the available list.
    /// Returns an empty list when the pack is empty.
    pub fn assign(&mut self, count: usize) -> Vec<String> {
        if self.available.is_empty() || count == 0 {
            return Vec::new();
        }
        self.used = true;
        let mut picked = Vec::with_capacity(count);
        for _ in 0..count {
            picked.push(self.available[self.cursor % self.available.len()].clone());
            self.cursor += 1;
        }
        picked
    }

    /// Whether any fallback id was handed out.
    pub fn was_used(&self) -> bool {
        self.used
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("ev_0000000{i}")).collect()
    }

    #[test]
    fn cycles_round_robin_across_calls() {
        let mut assigner = FallbackAssigner::new(ids(3));
        assert_eq!(assigner.assign(1), vec!["ev_00000000"]);
        assert_eq!(assigner.assign(1), vec!["ev_00000001"]);
        assert_eq!(assigner.assign(2), vec!["ev_00000002", "ev_00000000"]);
        assert!(assigner.was_used());
    }

    #[test]
    fn empty_pack_assigns_nothing() {
        let mut assigner = FallbackAssigner::new(Vec::new());
        assert!(assigner.assign(2).is_empty());
        assert!(!assigner.was_used());
    }

    #[test]
    fn zero_count_does_not_mark_usage() {
        let mut assigner = FallbackAssigner::new(ids(2));
        assert!(assigner.assign(0).is_empty());
        assert!(!assigner.was_used());
    }
}
