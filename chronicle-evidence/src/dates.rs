//! Best-effort publish-date resolution.
//!
//! Order of preference: a date already present in the item's structured
//! payload, then a date inferred from free text (body first, then title).
//! Successful inference is written back into the payload so later window
//! checks are a single key lookup.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chronicle_core::models::evidence::EvidenceItem;
use regex::Regex;

/// Payload keys recognized as carrying a publish date.
const DATE_KEYS: &[&str] = &[
    "publish_date",
    "published_date",
    "published",
    "date",
    "updated",
    "last_updated",
];

const MONTHS: &str = "january|february|march|april|may|june|july|august|september|october|\
                      november|december|jan|feb|mar|apr|jun|jul|aug|sep|sept|oct|nov|dec";

const LABELS: &str = "published|updated|written|posted|date|last\\s+updated|last\\s+modified";

// "Published 29 Jan 2023", "Last updated: 3rd February 2026"
static RE_LABELLED_DMY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(?:{LABELS})\s*[:\-]?\s*(\d{{1,2}})(?:st|nd|rd|th)?\s+({MONTHS})\s+(20\d{{2}})"
    ))
    .unwrap()
});

// "Posted Jan 29, 2023"
static RE_LABELLED_MDY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(?:{LABELS})\s*[:\-]?\s*({MONTHS})\s+(\d{{1,2}})(?:st|nd|rd|th)?,\s*(20\d{{2}})"
    ))
    .unwrap()
});

// "29 Jan 2023" anywhere in prose.
static RE_BARE_DMY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?\s+({MONTHS})\s+(20\d{{2}})\b"
    ))
    .unwrap()
});

// "January 29, 2023" anywhere in prose.
static RE_BARE_MDY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b({MONTHS})\s+(\d{{1,2}})(?:st|nd|rd|th)?,\s*(20\d{{2}})\b"
    ))
    .unwrap()
});

// "2023-01-29", "2023/01/29", "2023.01.29"
static RE_NUMERIC_YMD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(20\d{2})[-/.](0[1-9]|1[0-2])[-/.](0[1-9]|[12]\d|3[01])\b").unwrap()
});

fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    let n = match &lower[..3.min(lower.len())] {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(n)
}

fn build_date(year: &str, month_name: &str, day: &str) -> Option<NaiveDate> {
    let year: i32 = year.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    let month = month_number(month_name)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a structured date string: RFC 3339 / ISO-8601 datetimes (trailing
/// `Z` accepted) or a plain `YYYY-MM-DD`.
pub fn parse_date_value(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Infer a date from free text, preferring labelled phrases over bare ones.
pub fn infer_date_from_text(text: &str) -> Option<NaiveDate> {
    if let Some(caps) = RE_LABELLED_DMY.captures(text) {
        if let Some(d) = build_date(&caps[3], &caps[2], &caps[1]) {
            return Some(d);
        }
    }
    if let Some(caps) = RE_LABELLED_MDY.captures(text) {
        if let Some(d) = build_date(&caps[3], &caps[1], &caps[2]) {
            return Some(d);
        }
    }
    if let Some(caps) = RE_BARE_DMY.captures(text) {
        if let Some(d) = build_date(&caps[3], &caps[2], &caps[1]) {
            return Some(d);
        }
    }
    if let Some(caps) = RE_BARE_MDY.captures(text) {
        if let Some(d) = build_date(&caps[3], &caps[1], &caps[2]) {
            return Some(d);
        }
    }
    if let Some(caps) = RE_NUMERIC_YMD.captures(text) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }
    None
}

fn date_from_payload(item: &EvidenceItem) -> Option<NaiveDate> {
    DATE_KEYS
        .iter()
        .filter_map(|key| item.data_str(key))
        .find_map(parse_date_value)
}

fn date_from_free_text(item: &EvidenceItem) -> Option<NaiveDate> {
    item.text
        .as_deref()
        .and_then(infer_date_from_text)
        .or_else(|| item.title.as_deref().and_then(infer_date_from_text))
}

/// Resolve an item's publish date without mutating it.
pub fn resolve_publish_date(item: &EvidenceItem) -> Option<NaiveDate> {
    date_from_payload(item).or_else(|| date_from_free_text(item))
}

/// Resolve an item's publish date, writing a successful free-text inference
/// back into the structured payload under `publish_date`.
pub fn ensure_publish_date(item: &mut EvidenceItem) -> Option<NaiveDate> {
    if let Some(date) = date_from_payload(item) {
        return Some(date);
    }
    let inferred = date_from_free_text(item)?;
    item.set_data_str("publish_date", inferred.to_string());
    Some(inferred)
}
