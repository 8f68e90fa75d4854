//! Explicit pipeline state machine.

use chronicle_core::errors::{ChronicleError, ChronicleResult};
use tracing::debug;

/// The phases a report run moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    Researching,
    Reviewing,
    /// Decision point after a review pass: loop back or move on.
    FixingOrDone,
    Editing,
    Assembling,
    Done,
}

impl PipelineState {
    /// States a phase may legally move to next.
    pub fn successors(self) -> &'static [PipelineState] {
        use PipelineState::*;
        match self {
            Init => &[Researching],
            Researching => &[Reviewing],
            Reviewing => &[FixingOrDone],
            FixingOrDone => &[Researching, Editing],
            Editing => &[Assembling],
            Assembling => &[Done],
            Done => &[],
        }
    }
}

/// Tracks the current phase and guards the review loop bound.
///
/// The `FixingOrDone -> Researching` edge is the only cycle; it may be
/// taken at most `max_rounds - 1` times, matching the fix-loop contract
/// that the first research pass plus redrafts never exceed `max_rounds`.
#[derive(Debug)]
pub struct PipelineFsm {
    state: PipelineState,
    redraft_cycles: u32,
    max_rounds: u32,
}

impl PipelineFsm {
    pub fn new(max_rounds: u32) -> Self {
        Self {
            state: PipelineState::Init,
            redraft_cycles: 0,
            max_rounds: max_rounds.max(1),
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Move to `next`, rejecting edges the machine does not define and
    /// redraft cycles beyond the round limit.
    pub fn transition(&mut self, next: PipelineState) -> ChronicleResult<PipelineState> {
        if !self.state.successors().contains(&next) {
            return Err(ChronicleError::Pipeline(format!(
                "illegal transition {:?} -> {:?}",
                self.state, next
            )));
        }
        if self.state == PipelineState::FixingOrDone && next == PipelineState::Researching {
            if self.redraft_cycles + 1 >= self.max_rounds {
                return Err(ChronicleError::Pipeline(format!(
                    "redraft cycle limit reached ({} rounds)",
                    self.max_rounds
                )));
            }
            self.redraft_cycles += 1;
        }
        debug!(from = ?self.state, to = ?next, "pipeline transition");
        self.state = next;
        Ok(next)
    }

    pub fn redraft_cycles(&self) -> u32 {
        self.redraft_cycles
    }
}
