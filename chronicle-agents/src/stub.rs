//! Deterministic collaborators for tests and offline runs.

use async_trait::async_trait;
use chronicle_core::errors::{ChronicleError, ChronicleResult};
use chronicle_core::models::review::{ReviewResult, ReviewScore};
use chronicle_core::models::section::{SectionDraft, SectionSpec};
use chronicle_evidence::EvidencePack;

use crate::drafter::{postprocess_draft, RawBullet, RawDraft};
use crate::traits::{DraftConstraints, Drafter, EditOutcome, Editor, Reviewer};

/// Drafter that writes a fixed-shape draft citing the pack's own items.
///
/// The raw draft cites the first two evidence ids in its big picture and
/// one id per bullet in pack order, then runs through the same
/// post-processing as the live drafter, so citation validation and marker
/// stripping are exercised without a model.
#[derive(Debug, Default)]
pub struct StubDrafter;

#[async_trait]
impl Drafter for StubDrafter {
    async fn draft(
        &self,
        section: &SectionSpec,
        pack: &EvidencePack,
        constraints: &DraftConstraints,
    ) -> ChronicleResult<SectionDraft> {
        let ids = pack.evidence_ids();
        if ids.is_empty() {
            return Ok(SectionDraft::degraded(
                &section.id,
                "No evidence was available for drafting.",
            ));
        }

        let bullet_count = constraints.bullet_count.min(ids.len()).max(1);
        let raw = RawDraft {
            headline: Some(format!("{} update", section.display_name)),
            big_picture: format!(
                "Summary of {} activity between {} and {}.",
                section.display_name, constraints.window.start, constraints.window.end
            ),
            big_picture_evidence_ids: ids.iter().take(2).cloned().collect(),
            bullets: (0..bullet_count)
                .map(|i| RawBullet {
                    text: format!("Development {} in {}.", i + 1, section.display_name),
                    evidence_ids: vec![ids[i % ids.len()].clone()],
                    entity: section.entities.first().cloned(),
                })
                .collect(),
            risk_flags: vec![],
        };

        Ok(postprocess_draft(&section.id, raw, pack, constraints.bullet_count))
    }
}

/// One scripted review verdict.
#[derive(Debug, Clone)]
pub struct ScriptedVerdict {
    pub scores: ReviewScore,
    pub accepted: bool,
    pub issues: Vec<String>,
}

impl ScriptedVerdict {
    pub fn accept() -> Self {
        Self {
            scores: ReviewScore {
                grounding: 5,
                clarity: 5,
                newsworthiness: 4,
                balance: 4,
                voice_fit: 4,
            },
            accepted: true,
            issues: vec![],
        }
    }

    pub fn reject(issue: &str) -> Self {
        Self {
            scores: ReviewScore {
                grounding: 2,
                clarity: 3,
                newsworthiness: 4,
                balance: 4,
                voice_fit: 4,
            },
            accepted: false,
            issues: vec![issue.to_string()],
        }
    }
}

/// Reviewer that replays a per-round script.
///
/// Round `n` uses `verdicts[n - 1]`; rounds past the end of the script
/// repeat the last verdict.
#[derive(Debug)]
pub struct StubReviewer {
    verdicts: Vec<ScriptedVerdict>,
}

impl StubReviewer {
    pub fn new(verdicts: Vec<ScriptedVerdict>) -> Self {
        Self { verdicts }
    }

    /// Accepts on the first round.
    pub fn accepting() -> Self {
        Self::new(vec![ScriptedVerdict::accept()])
    }

    /// Rejects every round.
    pub fn rejecting(issue: &str) -> Self {
        Self::new(vec![ScriptedVerdict::reject(issue)])
    }
}

#[async_trait]
impl Reviewer for StubReviewer {
    async fn review(
        &self,
        draft: &SectionDraft,
        _pack: &EvidencePack,
        _voice_profile: &str,
        round: u32,
    ) -> ChronicleResult<ReviewResult> {
        let idx = (round.max(1) as usize - 1).min(self.verdicts.len().saturating_sub(1));
        let verdict = self
            .verdicts
            .get(idx)
            .cloned()
            .unwrap_or_else(ScriptedVerdict::accept);
        Ok(ReviewResult {
            section_id: draft.section_id.clone(),
            round,
            scores: verdict.scores,
            issues: verdict.issues,
            fix_plan: None,
            accepted: verdict.accepted,
            notes: None,
        })
    }
}

/// Editor that passes drafts through, optionally flagging claims.
#[derive(Debug, Default)]
pub struct StubEditor {
    unsupported_claims: Vec<String>,
}

impl StubEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// An editor that fails the citation policy with the given claims.
    pub fn flagging(claims: Vec<String>) -> Self {
        Self {
            unsupported_claims: claims,
        }
    }
}

#[async_trait]
impl Editor for StubEditor {
    async fn edit(
        &self,
        drafts: &[SectionDraft],
        _voice_profile: &str,
        _style_prompt: Option<&str>,
    ) -> ChronicleResult<EditOutcome> {
        if !self.unsupported_claims.is_empty() {
            return Err(ChronicleError::CitationPolicy {
                claims: self.unsupported_claims.clone(),
            });
        }
        Ok(EditOutcome {
            drafts: drafts.to_vec(),
            change_log: vec!["No changes required.".to_string()],
        })
    }
}
