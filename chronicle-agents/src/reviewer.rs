//! Review collaborator: scores a draft against the five-dimension rubric.

use async_trait::async_trait;
use chronicle_core::errors::ChronicleResult;
use chronicle_core::models::review::{
    FixAction, FixActionType, FixPlan, ReviewResult, ReviewScore,
};
use chronicle_core::models::section::SectionDraft;
use chronicle_evidence::EvidencePack;
use serde::Deserialize;
use tracing::warn;

use crate::traits::Reviewer;
use crate::wire::{extract_json, ChatClient};

const REVIEW_SYSTEM_PROMPT: &str = "\
You are a senior editor reviewing one section of a briefing report.

Score 0-5 on each rubric dimension:
- grounding: claims supported by the listed evidence
- clarity: concise and comprehensible
- newsworthiness: timely and important
- balance: avoids hype, includes caveats
- voice_fit: matches the target voice ({voice})

Acceptance requires grounding >= 4, clarity >= 4, and no blocking issues.

## Draft
{draft}

## Available evidence
{evidence}

## Output format
Respond with JSON:
{\"scores\": {\"grounding\": 0, \"clarity\": 0, \"newsworthiness\": 0, \
\"balance\": 0, \"voice_fit\": 0}, \"issues\": [\"...\"], \
\"fix_actions\": [{\"action_type\": \
\"fetch_source|rewrite|add_citation|clarify|adjust_tone\", \
\"description\": \"...\", \"target\": null, \"suggested_query\": null}], \
\"accepted\": false, \"notes\": null}";

#[derive(Debug, Default, Deserialize)]
struct RawReview {
    #[serde(default)]
    scores: RawScores,
    #[serde(default)]
    issues: Vec<String>,
    #[serde(default)]
    fix_actions: Vec<RawFixAction>,
    #[serde(default)]
    accepted: bool,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawScores {
    #[serde(default)]
    grounding: u8,
    #[serde(default)]
    clarity: u8,
    #[serde(default)]
    newsworthiness: u8,
    #[serde(default)]
    balance: u8,
    #[serde(default)]
    voice_fit: u8,
}

#[derive(Debug, Deserialize)]
struct RawFixAction {
    #[serde(default)]
    action_type: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    suggested_query: Option<String>,
}

/// Parse a collaborator response into the raw review shape.
fn parse_review(response: &str) -> Option<RawReview> {
    extract_json(response).and_then(|value| serde_json::from_value(value).ok())
}

/// Unrecognized action types degrade to a plain rewrite.
fn parse_action_type(raw: &str) -> FixActionType {
    match raw {
        "fetch_source" => FixActionType::FetchSource,
        "add_citation" => FixActionType::AddCitation,
        "clarify" => FixActionType::Clarify,
        "adjust_tone" => FixActionType::AdjustTone,
        _ => FixActionType::Rewrite,
    }
}

/// Live review collaborator.
pub struct LlmReviewer {
    client: ChatClient,
    model: String,
}

impl LlmReviewer {
    pub fn new(client: ChatClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

fn evidence_summary(pack: &EvidencePack) -> String {
    pack.items()
        .iter()
        .map(|item| {
            format!(
                "- {}: {} ({})",
                item.id,
                item.title.as_deref().unwrap_or("No title"),
                item.source_name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_result(draft: &SectionDraft, round: u32, raw: RawReview) -> ReviewResult {
    let scores = ReviewScore {
        grounding: raw.scores.grounding,
        clarity: raw.scores.clarity,
        newsworthiness: raw.scores.newsworthiness,
        balance: raw.scores.balance,
        voice_fit: raw.scores.voice_fit,
    }
    .clamped();

    let actions: Vec<FixAction> = raw
        .fix_actions
        .into_iter()
        .map(|a| FixAction {
            action_type: parse_action_type(&a.action_type),
            description: a.description,
            target: a.target,
            suggested_query: a.suggested_query,
        })
        .collect();

    // A fix plan is only attached to a rejecting review; the gate treats
    // a blocking plan as an unconditional rejection.
    let fix_plan = (!raw.accepted && !actions.is_empty()).then(|| FixPlan {
        section_id: draft.section_id.clone(),
        target_agent: format!("research_{}", draft.section_id),
        issues: raw.issues.clone(),
        actions,
        blocking: true,
    });

    ReviewResult {
        section_id: draft.section_id.clone(),
        round,
        scores,
        issues: raw.issues,
        fix_plan,
        accepted: raw.accepted,
        notes: raw.notes,
    }
}

#[async_trait]
impl Reviewer for LlmReviewer {
    async fn review(
        &self,
        draft: &SectionDraft,
        pack: &EvidencePack,
        voice_profile: &str,
        round: u32,
    ) -> ChronicleResult<ReviewResult> {
        let draft_json =
            serde_json::to_string_pretty(draft).unwrap_or_else(|_| "{}".to_string());
        let system = REVIEW_SYSTEM_PROMPT
            .replace("{voice}", voice_profile)
            .replace("{draft}", &draft_json)
            .replace("{evidence}", &evidence_summary(pack));

        let response = match self
            .client
            .complete("reviewer", &self.model, 0.0, &system, "Review this section.")
            .await
        {
            Ok(content) => content,
            Err(e) => {
                warn!(section = %draft.section_id, error = %e, "review call failed, degrading");
                return Ok(ReviewResult::degraded(
                    &draft.section_id,
                    round,
                    "Review call failed.",
                ));
            }
        };

        let Some(raw) = parse_review(&response) else {
            warn!(section = %draft.section_id, "review response was not parseable, degrading");
            return Ok(ReviewResult::degraded(
                &draft.section_id,
                round,
                "Review response could not be parsed.",
            ));
        };

        Ok(build_result(draft, round, raw))
    }
}
