//! Combining concurrent per-section outputs.

use std::collections::HashMap;

use tracing::warn;

/// Merge per-section outputs into one map.
///
/// Conflict policy: last write per section id wins. Section ids are
/// disjoint by construction (each research task owns exactly one section
/// and never emits another section's id), so with well-behaved callers no
/// write is ever actually overwritten and the merge is order-independent.
/// A duplicate key therefore indicates a task bug and is logged.
pub fn merge_section_outputs<T>(
    outputs: impl IntoIterator<Item = (String, T)>,
) -> HashMap<String, T> {
    let mut merged = HashMap::new();
    for (section_id, output) in outputs {
        if merged.insert(section_id.clone(), output).is_some() {
            warn!(section = %section_id, "duplicate section output overwritten in merge");
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_keys_merge_order_independently() {
        let forward = merge_section_outputs(vec![
            ("a".to_string(), 1),
            ("b".to_string(), 2),
            ("c".to_string(), 3),
        ]);
        let reverse = merge_section_outputs(vec![
            ("c".to_string(), 3),
            ("b".to_string(), 2),
            ("a".to_string(), 1),
        ]);
        assert_eq!(forward, reverse);
        assert_eq!(forward.len(), 3);
    }

    #[test]
    fn duplicate_key_takes_the_last_write() {
        let merged = merge_section_outputs(vec![
            ("a".to_string(), "old"),
            ("a".to_string(), "new"),
        ]);
        assert_eq!(merged["a"], "new");
    }
}
