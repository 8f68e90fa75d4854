//! Source-identity normalization for deduplication.
//!
//! Two evidence items are the same source when their normalized URLs match,
//! or — for items with no URL at all — when their normalized titles match.

use url::Url;

/// Query-string keys that never distinguish sources.
const TRACKING_PARAMS: &[&str] = &[
    "ref", "ref_src", "fbclid", "gclid", "igshid", "mc_cid", "mc_eid", "s", "spm",
];

fn is_tracking_param(key: &str) -> bool {
    key.starts_with("utm_") || TRACKING_PARAMS.contains(&key)
}

/// Canonicalize a URL into its dedup key.
///
/// Lowercases scheme and host, strips the trailing slash from non-root
/// paths, drops tracking query parameters and the fragment, and re-encodes
/// the surviving query pairs in key order. Unparseable input falls back to
/// the trimmed, lowercased original string.
pub fn normalize_url(raw: &str) -> String {
    let Ok(mut url) = Url::parse(raw.trim()) else {
        return raw.trim().to_lowercase();
    };

    url.set_fragment(None);

    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| !is_tracking_param(k))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    pairs.sort();
    if pairs.is_empty() {
        url.set_query(None);
    } else {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (k, v) in &pairs {
            serializer.append_pair(k, v);
        }
        url.set_query(Some(&serializer.finish()));
    }

    // Url already lowercases scheme and host during parsing.
    let path = url.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        url.set_path(path.trim_end_matches('/'));
    }

    url.to_string()
}

/// Title dedup key: trimmed, lowercased, inner whitespace collapsed.
/// Used only when neither item carries a URL.
pub fn normalize_title(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracking_params_are_dropped() {
        let a = normalize_url("https://example.com/story?utm_source=x&utm_medium=y&id=7");
        let b = normalize_url("https://example.com/story?id=7&fbclid=abc123");
        assert_eq!(a, b);
        assert!(a.contains("id=7"));
        assert!(!a.contains("utm_source"));
    }

    #[test]
    fn host_and_scheme_are_case_insensitive() {
        assert_eq!(
            normalize_url("HTTPS://Example.COM/News"),
            normalize_url("https://example.com/News"),
        );
    }

    #[test]
    fn path_case_is_preserved() {
        let a = normalize_url("https://example.com/News");
        let b = normalize_url("https://example.com/news");
        assert_ne!(a, b);
    }

    #[test]
    fn trailing_slash_and_fragment_are_ignored() {
        assert_eq!(
            normalize_url("https://example.com/a/b/#section"),
            normalize_url("https://example.com/a/b"),
        );
    }

    #[test]
    fn root_path_keeps_its_slash() {
        assert_eq!(normalize_url("https://example.com/"), "https://example.com/");
    }

    #[test]
    fn query_order_is_stable() {
        assert_eq!(
            normalize_url("https://example.com/x?b=2&a=1"),
            normalize_url("https://example.com/x?a=1&b=2"),
        );
    }

    #[test]
    fn unparseable_url_falls_back_to_lowercased_string() {
        assert_eq!(normalize_url("  Not A Url  "), "not a url");
    }

    #[test]
    fn title_key_collapses_whitespace_and_case() {
        assert_eq!(
            normalize_title("  Fibre   Buildout  Accelerates \n"),
            "fibre buildout accelerates",
        );
    }
}
