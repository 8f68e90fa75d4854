use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{ChronicleError, ChronicleResult};

/// Inclusive date range the report covers.
///
/// Invariant: `start <= end`, enforced at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimeWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> ChronicleResult<Self> {
        if start > end {
            return Err(ChronicleError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window length in days (zero for a single-day window).
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
