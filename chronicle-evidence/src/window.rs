//! Time-window filtering of evidence items.

use chronicle_core::models::evidence::EvidenceItem;
use chronicle_core::models::window::TimeWindow;
use serde::{Deserialize, Serialize};

use crate::dates::resolve_publish_date;

/// How undated evidence is treated by the window filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePolicy {
    /// Items with no resolvable publish date are excluded.
    Strict,
    /// Items with no resolvable publish date are kept.
    Lenient,
}

/// Whether an item falls outside the inclusive `[start, end]` window.
///
/// Dated items are outside iff their date is before `start` or after `end`.
/// Undated items are outside under [`DatePolicy::Strict`] only.
pub fn is_outside_window(item: &EvidenceItem, window: &TimeWindow, policy: DatePolicy) -> bool {
    match resolve_publish_date(item) {
        Some(date) => !window.contains(date),
        None => policy == DatePolicy::Strict,
    }
}
