//! Dense per-section citation numbering.

use std::collections::HashMap;

use chronicle_core::models::section::SectionDraft;

/// Evidence-id to citation-number mapping, local to one section.
///
/// Numbers are assigned on first appearance, walking the big-picture ids
/// and then each bullet's ids in order. Two sections citing the same item
/// number it independently.
#[derive(Debug, Default)]
pub struct CitationNumbers {
    order: Vec<String>,
    index: HashMap<String, usize>,
}

impl CitationNumbers {
    pub fn for_draft(draft: &SectionDraft) -> Self {
        let mut numbers = Self::default();
        for id in &draft.big_picture_evidence_ids {
            numbers.insert(id);
        }
        for bullet in &draft.bullets {
            for id in &bullet.evidence_ids {
                numbers.insert(id);
            }
        }
        numbers
    }

    fn insert(&mut self, id: &str) {
        if !self.index.contains_key(id) {
            self.order.push(id.to_string());
            self.index.insert(id.to_string(), self.order.len());
        }
    }

    /// 1-based citation number for an evidence id, if it was cited.
    pub fn number(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Ids in citation-number order, paired with their numbers.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.order
            .iter()
            .enumerate()
            .map(|(i, id)| (i + 1, id.as_str()))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
