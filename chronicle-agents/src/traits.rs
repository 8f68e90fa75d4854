//! Collaborator seams.

use async_trait::async_trait;
use chronicle_core::errors::ChronicleResult;
use chronicle_core::models::review::ReviewResult;
use chronicle_core::models::section::{SectionDraft, SectionSpec};
use chronicle_core::models::window::TimeWindow;
use chronicle_evidence::EvidencePack;

/// Constraints forwarded to the drafting collaborator.
#[derive(Debug, Clone)]
pub struct DraftConstraints {
    pub window: TimeWindow,
    pub voice_profile: String,
    pub style_prompt: Option<String>,
    pub region_focus: Option<String>,
    /// Exact number of bullets the draft must carry.
    pub bullet_count: usize,
}

/// Outcome of the editorial pass.
#[derive(Debug, Clone)]
pub struct EditOutcome {
    /// Edited drafts, same order as the input.
    pub drafts: Vec<SectionDraft>,
    /// Human-readable change log.
    pub change_log: Vec<String>,
}

/// Turns an evidence pack into a structured section draft.
#[async_trait]
pub trait Drafter: Send + Sync {
    async fn draft(
        &self,
        section: &SectionSpec,
        pack: &EvidencePack,
        constraints: &DraftConstraints,
    ) -> ChronicleResult<SectionDraft>;
}

/// Scores a draft against the five-dimension rubric.
///
/// The returned `accepted` flag is advisory; the review gate applies the
/// threshold floor on top of it.
#[async_trait]
pub trait Reviewer: Send + Sync {
    async fn review(
        &self,
        draft: &SectionDraft,
        pack: &EvidencePack,
        voice_profile: &str,
        round: u32,
    ) -> ChronicleResult<ReviewResult>;
}

/// Harmonizes accepted drafts across sections.
///
/// Returns `ChronicleError::CitationPolicy` when the pass surfaces claims
/// with no evidence backing — the one hard failure in the pipeline.
#[async_trait]
pub trait Editor: Send + Sync {
    async fn edit(
        &self,
        drafts: &[SectionDraft],
        voice_profile: &str,
        style_prompt: Option<&str>,
    ) -> ChronicleResult<EditOutcome>;
}
