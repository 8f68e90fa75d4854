//! Property tests for citation-id normalization and extraction.

use proptest::prelude::*;

use chronicle_citations::{extract_ids, normalize_ids, strip_markers};

fn arb_evidence_id() -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::char::range('0', '9').prop_union(proptest::char::range('a', 'f')), 8)
        .prop_map(|chars| format!("ev_{}", chars.into_iter().collect::<String>()))
}

proptest! {
    /// Normalizing an already-normalized list returns the same list.
    #[test]
    fn normalize_is_idempotent(ids in proptest::collection::vec(arb_evidence_id(), 0..8)) {
        let once = normalize_ids(ids.iter());
        let twice = normalize_ids(once.iter());
        prop_assert_eq!(once, twice);
    }

    /// The same id embedded in different surrounding text collapses to one.
    #[test]
    fn embedded_wrappers_collapse(id in arb_evidence_id()) {
        let wrapped = vec![
            id.clone(),
            format!("[{id}]"),
            format!("(see {id})"),
            format!("source {} trailing", id.to_uppercase()),
        ];
        let normalized = normalize_ids(wrapped.iter());
        prop_assert_eq!(normalized, vec![id]);
    }

    /// Every generated id placed into prose is recovered in order.
    #[test]
    fn extraction_recovers_planted_ids(ids in proptest::collection::vec(arb_evidence_id(), 1..6)) {
        let mut unique = Vec::new();
        for id in &ids {
            if !unique.contains(id) {
                unique.push(id.clone());
            }
        }
        let prose = ids
            .iter()
            .map(|id| format!("claim supported by {id}."))
            .collect::<Vec<_>>()
            .join(" ");
        prop_assert_eq!(extract_ids(&prose), unique);
    }

    /// Stripping removes every extractable id from the text.
    #[test]
    fn stripped_text_has_no_ids(ids in proptest::collection::vec(arb_evidence_id(), 1..5)) {
        let prose = ids
            .iter()
            .map(|id| format!("fact ({id}) noted"))
            .collect::<Vec<_>>()
            .join(", ");
        let stripped = strip_markers(&prose);
        prop_assert!(extract_ids(&stripped).is_empty());
    }
}
