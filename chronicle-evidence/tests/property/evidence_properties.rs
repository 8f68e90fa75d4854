//! Property tests for URL normalization and pack deduplication.

use proptest::prelude::*;

use chronicle_core::models::evidence::{EvidenceItem, SourceType};
use chronicle_evidence::{normalize_url, EvidencePack};

fn arb_path() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-z0-9]{1,8}", 1..4).prop_map(|segs| segs.join("/"))
}

fn arb_tracking_query() -> impl Strategy<Value = String> {
    proptest::sample::select(vec![
        "utm_source=newsletter",
        "utm_medium=email&utm_campaign=weekly",
        "fbclid=abc123",
        "gclid=xyz",
        "ref=homepage",
        "mc_cid=42",
    ])
    .prop_map(|s| s.to_string())
}

proptest! {
    /// Normalization is idempotent.
    #[test]
    fn normalize_url_is_idempotent(path in arb_path(), query in arb_tracking_query()) {
        let url = format!("https://Example.COM/{path}?{query}#frag");
        let once = normalize_url(&url);
        prop_assert_eq!(once.clone(), normalize_url(&once));
    }

    /// Tracking parameters, fragments, and case differences never
    /// distinguish two URLs.
    #[test]
    fn tracking_params_do_not_distinguish_urls(path in arb_path(), query in arb_tracking_query()) {
        let plain = format!("https://example.com/{path}");
        let decorated = format!("https://EXAMPLE.com/{path}?{query}#section");
        prop_assert_eq!(normalize_url(&plain), normalize_url(&decorated));
    }

    /// Adding the same source under varying tracking decorations keeps
    /// exactly one pack entry, whatever the insertion order.
    #[test]
    fn pack_dedup_is_insertion_order_independent(
        path in arb_path(),
        queries in proptest::collection::vec(arb_tracking_query(), 1..5),
    ) {
        let mut pack = EvidencePack::new("s");
        pack.add(
            EvidenceItem::new(SourceType::Web, "web_search")
                .with_url(format!("https://example.com/{path}")),
        );
        for query in &queries {
            pack.add(
                EvidenceItem::new(SourceType::Web, "web_search")
                    .with_url(format!("https://example.com/{path}?{query}")),
            );
        }
        prop_assert_eq!(pack.len(), 1);

        let mut reversed = EvidencePack::new("s");
        for query in queries.iter().rev() {
            reversed.add(
                EvidenceItem::new(SourceType::Web, "web_search")
                    .with_url(format!("https://example.com/{path}?{query}")),
            );
        }
        reversed.add(
            EvidenceItem::new(SourceType::Web, "web_search")
                .with_url(format!("https://example.com/{path}")),
        );
        prop_assert_eq!(reversed.len(), 1);
    }
}
