//! Threshold gate over reviewer verdicts.

use chronicle_core::config::ChronicleConfig;
use chronicle_core::constants::{DEFAULT_CLARITY_THRESHOLD, DEFAULT_GROUNDING_THRESHOLD};
use chronicle_core::models::review::ReviewResult;
use tracing::debug;

/// Applies the rubric floor on top of the reviewer's advisory verdict.
///
/// The reviewer's `accepted` flag can only reject, never accept: a draft
/// passes the gate when the reviewer accepted it, its grounding and
/// clarity scores clear the thresholds, and no blocking fix plan is
/// attached.
#[derive(Debug, Clone, Copy)]
pub struct ReviewGate {
    grounding_threshold: u8,
    clarity_threshold: u8,
}

impl Default for ReviewGate {
    fn default() -> Self {
        Self {
            grounding_threshold: DEFAULT_GROUNDING_THRESHOLD,
            clarity_threshold: DEFAULT_CLARITY_THRESHOLD,
        }
    }
}

impl ReviewGate {
    pub fn new(grounding_threshold: u8, clarity_threshold: u8) -> Self {
        Self {
            grounding_threshold,
            clarity_threshold,
        }
    }

    pub fn from_config(config: &ChronicleConfig) -> Self {
        Self::new(config.grounding_threshold, config.clarity_threshold)
    }

    /// Gate a review: true means the draft proceeds as accepted.
    pub fn decide(&self, result: &ReviewResult) -> bool {
        let thresholds_met = result
            .scores
            .passes_thresholds(self.grounding_threshold, self.clarity_threshold);
        let blocking_plan = result
            .fix_plan
            .as_ref()
            .is_some_and(|plan| plan.blocking);
        let accepted = result.accepted && thresholds_met && !blocking_plan;
        if result.accepted && !accepted {
            debug!(
                section = %result.section_id,
                round = result.round,
                grounding = result.scores.grounding,
                clarity = result.scores.clarity,
                blocking_plan,
                "gate overrode reviewer acceptance"
            );
        }
        accepted
    }
}
