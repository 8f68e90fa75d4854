//! Removal of inline citation markers from rendered prose.

use std::sync::LazyLock;

use regex::Regex;

// Parenthetical groups containing an id, e.g. "(ev_aabbccdd, ev_11223344)".
static RE_PAREN_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*\([^)]*ev_[0-9a-f]{8}[^)]*\)").unwrap());

// Bracketed groups containing an id, e.g. "[evidence: ev_aabbccdd]".
static RE_BRACKET_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*\[[^\]]*ev_[0-9a-f]{8}[^\]]*\]").unwrap());

// Any id left standing bare in the text.
static RE_BARE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*ev_[0-9a-f]{8}").unwrap());

static RE_EMPTY_PARENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(\s*\)").unwrap());
static RE_SPACE_COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+,").unwrap());
static RE_MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

/// Remove inline citation markers, then collapse the whitespace and
/// punctuation artifacts the removal leaves behind.
pub fn strip_markers(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let cleaned = RE_PAREN_GROUP.replace_all(text, "");
    let cleaned = RE_BRACKET_GROUP.replace_all(&cleaned, "");
    let cleaned = RE_BARE_ID.replace_all(&cleaned, "");
    let cleaned = RE_EMPTY_PARENS.replace_all(&cleaned, "");
    let cleaned = RE_SPACE_COMMA.replace_all(&cleaned, ",");
    let cleaned = RE_MULTI_SPACE.replace_all(&cleaned, " ");
    cleaned.replace(" .", ".").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_parenthetical_markers() {
        assert_eq!(
            strip_markers("Equinix expanded in Frankfurt (ev_aabbccdd)."),
            "Equinix expanded in Frankfurt."
        );
    }

    #[test]
    fn strips_bracketed_marker_groups() {
        assert_eq!(
            strip_markers("Capacity grew 12% [evidence: ev_aabbccdd, ev_11223344] this week."),
            "Capacity grew 12% this week."
        );
    }

    #[test]
    fn strips_bare_trailing_ids() {
        assert_eq!(
            strip_markers("Zayo closed the deal ev_aabbccdd"),
            "Zayo closed the deal"
        );
    }

    #[test]
    fn cleans_up_leftover_punctuation() {
        assert_eq!(
            strip_markers("Deal closed (see ev_aabbccdd) , terms undisclosed."),
            "Deal closed, terms undisclosed."
        );
    }

    #[test]
    fn leaves_ordinary_parentheticals_alone() {
        assert_eq!(
            strip_markers("AWS (Amazon Web Services) expanded."),
            "AWS (Amazon Web Services) expanded."
        );
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(strip_markers(""), "");
    }
}
