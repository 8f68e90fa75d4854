use serde::{Deserialize, Serialize};

/// Per-section ceiling on retrieval calls (search + fetch combined).
///
/// Consumed monotonically during acquisition and never replenished within
/// a run. Enforcement happens before dispatch: a call is never scheduled
/// once the budget is spent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallBudget {
    limit: u32,
    used: u32,
}

impl CallBudget {
    pub fn new(limit: u32) -> Self {
        Self { limit, used: 0 }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn used(&self) -> u32 {
        self.used
    }

    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.used)
    }

    /// Reserve `n` calls. Returns false (and consumes nothing) when fewer
    /// than `n` calls remain.
    pub fn try_consume(&mut self, n: u32) -> bool {
        if self.remaining() < n {
            return false;
        }
        self.used += n;
        true
    }
}
