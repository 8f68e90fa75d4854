//! The deduplicated evidence collection scoped to one report section.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use chronicle_core::models::evidence::EvidenceItem;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalize::{normalize_title, normalize_url};

/// Ordered, deduplicated evidence for one section.
///
/// Invariants: no two items resolve to the same normalized URL, and no two
/// URL-less items share a normalized title. `add` is idempotent — the first
/// inserted item wins and later duplicates are dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidencePack {
    pub section_id: String,
    items: Vec<EvidenceItem>,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    url_keys: HashSet<String>,
    #[serde(skip)]
    title_keys: HashSet<String>,
}

impl EvidencePack {
    pub fn new(section_id: impl Into<String>) -> Self {
        Self {
            section_id: section_id.into(),
            items: Vec::new(),
            created_at: Utc::now(),
            url_keys: HashSet::new(),
            title_keys: HashSet::new(),
        }
    }

    /// Append an item unless it duplicates an existing source.
    ///
    /// Returns true when the item was inserted. Items with a URL dedup on
    /// the normalized URL; items without one fall back to the normalized
    /// title; items with neither are always inserted.
    pub fn add(&mut self, item: EvidenceItem) -> bool {
        if let Some(url) = item.url.as_deref() {
            let key = normalize_url(url);
            if !self.url_keys.insert(key) {
                debug!(section = %self.section_id, url, "dropped duplicate source");
                return false;
            }
        } else if let Some(title) = item.title.as_deref() {
            let key = normalize_title(title);
            if !self.title_keys.insert(key) {
                debug!(section = %self.section_id, title, "dropped duplicate untitled source");
                return false;
            }
        }
        self.items.push(item);
        true
    }

    /// Remove items failing the predicate, rebuilding the dedup keys so the
    /// slots can be reused by later inserts.
    pub fn retain<F: FnMut(&EvidenceItem) -> bool>(&mut self, mut keep: F) {
        self.items.retain(|item| keep(item));
        self.url_keys = self
            .items
            .iter()
            .filter_map(|i| i.url.as_deref())
            .map(normalize_url)
            .collect();
        self.title_keys = self
            .items
            .iter()
            .filter(|i| i.url.is_none())
            .filter_map(|i| i.title.as_deref())
            .map(normalize_title)
            .collect();
    }

    pub fn items(&self) -> &[EvidenceItem] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [EvidenceItem] {
        &mut self.items
    }

    pub fn get(&self, evidence_id: &str) -> Option<&EvidenceItem> {
        self.items.iter().find(|i| i.id == evidence_id)
    }

    pub fn evidence_ids(&self) -> Vec<String> {
        self.items.iter().map(|i| i.id.clone()).collect()
    }

    pub fn id_set(&self) -> HashSet<String> {
        self.items.iter().map(|i| i.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chronicle_core::models::evidence::SourceType;

    use super::*;

    fn web_item(url: &str) -> EvidenceItem {
        EvidenceItem::new(SourceType::Web, "search").with_url(url)
    }

    #[test]
    fn same_url_with_tracking_params_dedups_to_one() {
        let mut pack = EvidencePack::new("data_centers");
        assert!(pack.add(web_item("https://example.com/a?utm_source=mail")));
        assert!(!pack.add(web_item("https://example.com/a?gclid=zz")));
        assert!(!pack.add(web_item("https://example.com/a/")));
        assert_eq!(pack.len(), 1);
    }

    #[test]
    fn first_insert_wins() {
        let mut pack = EvidencePack::new("s");
        let first = web_item("https://example.com/a").with_title("first");
        let first_id = first.id.clone();
        pack.add(first);
        pack.add(web_item("https://example.com/a").with_title("second"));
        assert_eq!(pack.items()[0].id, first_id);
        assert_eq!(pack.items()[0].title.as_deref(), Some("first"));
    }

    #[test]
    fn title_dedup_applies_only_without_urls() {
        let mut pack = EvidencePack::new("s");
        let untitled = |t: &str| EvidenceItem::new(SourceType::Web, "search").with_title(t);
        assert!(pack.add(untitled("Fibre Buildout")));
        assert!(!pack.add(untitled("  fibre   buildout ")));
        // Same title with a URL is a distinct source.
        assert!(pack.add(web_item("https://example.com/x").with_title("Fibre Buildout")));
        assert_eq!(pack.len(), 2);
    }

    #[test]
    fn retain_frees_dedup_slots() {
        let mut pack = EvidencePack::new("s");
        pack.add(web_item("https://example.com/a"));
        pack.retain(|_| false);
        assert!(pack.is_empty());
        assert!(pack.add(web_item("https://example.com/a")));
    }

    #[test]
    fn lookup_by_id() {
        let mut pack = EvidencePack::new("s");
        let item = web_item("https://example.com/a");
        let id = item.id.clone();
        pack.add(item);
        assert!(pack.get(&id).is_some());
        assert!(pack.get("ev_00000000").is_none());
        assert_eq!(pack.evidence_ids(), vec![id]);
    }
}
