//! Bounded accept/retry loop over reviewed sections.

use std::collections::HashMap;

use chronicle_core::constants::DEFAULT_MAX_REVIEW_ROUNDS;
use chronicle_core::models::review::ReviewResult;
use tracing::{debug, info};

/// Where a section stands in the draft/review cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    /// Drafted, awaiting review.
    Drafted,
    /// Review recorded, gate decision pending.
    Reviewed,
    /// Cleared the gate, or force-terminated at the round limit.
    Accepted,
    /// Rejected with rounds remaining; goes back to drafting.
    NeedsFix,
}

#[derive(Debug)]
struct SectionProgress {
    state: SectionState,
    round: u32,
    history: Vec<ReviewResult>,
    forced: bool,
}

/// Drives each section through `Drafted → Reviewed → {Accepted, NeedsFix}`
/// until acceptance or the round limit.
///
/// At the limit the last draft proceeds regardless of the verdict; the
/// recorded `ReviewResult` keeps `accepted = false` so the audit trail
/// reflects what the reviewer actually said.
#[derive(Debug)]
pub struct FixLoopController {
    max_rounds: u32,
    sections: HashMap<String, SectionProgress>,
}

impl Default for FixLoopController {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REVIEW_ROUNDS)
    }
}

impl FixLoopController {
    pub fn new(max_rounds: u32) -> Self {
        Self {
            max_rounds: max_rounds.max(1),
            sections: HashMap::new(),
        }
    }

    /// Enter a section into the loop at round zero.
    pub fn register(&mut self, section_id: impl Into<String>) {
        self.sections.insert(
            section_id.into(),
            SectionProgress {
                state: SectionState::Drafted,
                round: 0,
                history: Vec::new(),
                forced: false,
            },
        );
    }

    /// Sections that still need a draft/review cycle, in no fixed order.
    pub fn pending(&self) -> Vec<String> {
        self.sections
            .iter()
            .filter(|(_, p)| matches!(p.state, SectionState::Drafted | SectionState::NeedsFix))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Begin a cycle for a section, returning the 1-based round number.
    pub fn begin_round(&mut self, section_id: &str) -> u32 {
        let progress = self.progress_mut(section_id);
        progress.round += 1;
        progress.state = SectionState::Drafted;
        progress.round
    }

    /// Record a gated review and advance the section's state.
    pub fn record(&mut self, result: ReviewResult, accepted: bool) -> SectionState {
        let max_rounds = self.max_rounds;
        let progress = self.progress_mut(&result.section_id);
        let section_id = result.section_id.clone();
        let round = progress.round;
        progress.history.push(result);
        progress.state = if accepted {
            SectionState::Accepted
        } else if round >= max_rounds {
            progress.forced = true;
            info!(section = %section_id, round, "round limit reached, forcing acceptance");
            SectionState::Accepted
        } else {
            debug!(section = %section_id, round, "section rejected, scheduling redraft");
            SectionState::NeedsFix
        };
        progress.state
    }

    pub fn state(&self, section_id: &str) -> Option<SectionState> {
        self.sections.get(section_id).map(|p| p.state)
    }

    pub fn round(&self, section_id: &str) -> u32 {
        self.sections.get(section_id).map_or(0, |p| p.round)
    }

    /// True when the section only proceeded because the limit was hit.
    pub fn was_forced(&self, section_id: &str) -> bool {
        self.sections.get(section_id).is_some_and(|p| p.forced)
    }

    /// Full append-only review history for a section.
    pub fn history(&self, section_id: &str) -> &[ReviewResult] {
        self.sections
            .get(section_id)
            .map_or(&[], |p| p.history.as_slice())
    }

    /// Drain the per-section histories, keyed by section id.
    pub fn into_history(self) -> HashMap<String, Vec<ReviewResult>> {
        self.sections
            .into_iter()
            .map(|(id, p)| (id, p.history))
            .collect()
    }

    pub fn all_settled(&self) -> bool {
        self.sections
            .values()
            .all(|p| p.state == SectionState::Accepted)
    }

    fn progress_mut(&mut self, section_id: &str) -> &mut SectionProgress {
        self.sections
            .entry(section_id.to_string())
            .or_insert_with(|| SectionProgress {
                state: SectionState::Drafted,
                round: 0,
                history: Vec::new(),
                forced: false,
            })
    }
}

#[cfg(test)]
mod tests {
    use chronicle_core::models::review::ReviewScore;

    use super::*;

    fn review(section_id: &str, round: u32) -> ReviewResult {
        ReviewResult {
            section_id: section_id.to_string(),
            round,
            scores: ReviewScore::default(),
            issues: vec![],
            fix_plan: None,
            accepted: false,
            notes: None,
        }
    }

    #[test]
    fn acceptance_settles_the_section() {
        let mut controller = FixLoopController::new(2);
        controller.register("fibre");
        let round = controller.begin_round("fibre");
        assert_eq!(round, 1);
        let state = controller.record(review("fibre", round), true);
        assert_eq!(state, SectionState::Accepted);
        assert!(!controller.was_forced("fibre"));
        assert!(controller.pending().is_empty());
    }

    #[test]
    fn rejection_below_the_limit_schedules_a_redraft() {
        let mut controller = FixLoopController::new(2);
        controller.register("fibre");
        let round = controller.begin_round("fibre");
        let state = controller.record(review("fibre", round), false);
        assert_eq!(state, SectionState::NeedsFix);
        assert_eq!(controller.pending(), vec!["fibre".to_string()]);
    }

    #[test]
    fn round_limit_forces_acceptance_but_history_keeps_the_rejection() {
        let mut controller = FixLoopController::new(2);
        controller.register("fibre");
        for _ in 0..2 {
            let round = controller.begin_round("fibre");
            controller.record(review("fibre", round), false);
        }
        assert_eq!(controller.state("fibre"), Some(SectionState::Accepted));
        assert!(controller.was_forced("fibre"));
        let history = controller.history("fibre");
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|r| !r.accepted));
    }

    #[test]
    fn rounds_count_per_section() {
        let mut controller = FixLoopController::new(3);
        controller.register("fibre");
        controller.register("spectrum");
        let r = controller.begin_round("fibre");
        controller.record(review("fibre", r), false);
        let r = controller.begin_round("fibre");
        controller.record(review("fibre", r), true);
        assert_eq!(controller.round("fibre"), 2);
        assert_eq!(controller.round("spectrum"), 0);
        assert!(!controller.all_settled());
    }

    #[test]
    fn max_rounds_is_clamped_to_at_least_one() {
        let mut controller = FixLoopController::new(0);
        controller.register("fibre");
        let round = controller.begin_round("fibre");
        let state = controller.record(review("fibre", round), false);
        // A zero limit still grants one round, then force-terminates.
        assert_eq!(state, SectionState::Accepted);
        assert!(controller.was_forced("fibre"));
    }
}
