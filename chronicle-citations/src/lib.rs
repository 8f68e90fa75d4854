//! # chronicle-citations
//!
//! Toolkit for the evidence-citation identifiers embedded in generated
//! prose. Identifiers have a fixed lexical shape: the `ev_` tag prefix
//! followed by eight hex characters.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

mod fallback;
mod strip;

pub use fallback::FallbackAssigner;
pub use strip::strip_markers;

/// The citation identifier shape. Matching is case-insensitive; extracted
/// ids are normalized to lowercase.
pub static EVIDENCE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)ev_[0-9a-f]{8}").unwrap());

fn unique_preserve_order(ids: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for id in ids {
        if seen.insert(id.clone()) {
            ordered.push(id);
        }
    }
    ordered
}

/// Extract every citation id embedded in `text`, first-seen order, deduped.
pub fn extract_ids(text: &str) -> Vec<String> {
    unique_preserve_order(
        EVIDENCE_ID_RE
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase()),
    )
}

/// Normalize a heterogeneous list of candidate ids.
///
/// Each entry contributes the embedded id when one is present, otherwise
/// its trimmed original form (empty entries are dropped). Order-preserving
/// dedup; idempotent on already-normalized input.
pub fn normalize_ids<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    unique_preserve_order(values.into_iter().filter_map(|value| {
        let value = value.as_ref();
        if let Some(m) = EVIDENCE_ID_RE.find(value) {
            return Some(m.as_str().to_lowercase());
        }
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }))
}

/// Filter a normalized id list down to ids the pack actually contains.
pub fn validate_ids(ids: &[String], known: &HashSet<String>) -> Vec<String> {
    ids.iter().filter(|id| known.contains(*id)).cloned().collect()
}
