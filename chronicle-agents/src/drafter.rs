//! Drafting collaborator: evidence pack in, structured section draft out.

use async_trait::async_trait;
use chronicle_citations::{extract_ids, normalize_ids, strip_markers, validate_ids, FallbackAssigner};
use chronicle_core::constants::{
    AUTO_ASSIGN_RISK_FLAG, BIG_PICTURE_FALLBACK_IDS, PROMPT_TEXT_CAP,
};
use chronicle_core::errors::ChronicleResult;
use chronicle_core::models::section::{Bullet, SectionDraft, SectionSpec};
use chronicle_evidence::EvidencePack;
use serde::Deserialize;
use tracing::warn;

use crate::traits::{DraftConstraints, Drafter};
use crate::wire::{extract_json, ChatClient};

const DRAFT_SYSTEM_PROMPT: &str = "\
You are a research analyst drafting one section of a briefing report.

## Your task
1. Analyze the provided evidence for the {section_name} section.
2. Draft a big-picture paragraph summarizing key themes (80-140 words).
3. Create EXACTLY {bullet_count} one-line bullets.

## Constraints
- Every claim MUST be supported by evidence; cite evidence ids.
- Only reference these entities: {entities}
- Focus on news within {start} to {end}.
- Voice: {voice}. Region focus: {region}.
{style}

## Output format
Respond with a JSON object:
{\"headline\": \"...\", \"big_picture\": \"...\", \
\"big_picture_evidence_ids\": [\"ev_xxx\"], \
\"bullets\": [{\"text\": \"...\", \"evidence_ids\": [\"ev_xxx\"], \"entity\": null}], \
\"risk_flags\": [\"...\"]}

## Evidence
{evidence}";

/// The draft shape the model is asked to emit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDraft {
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub big_picture: String,
    #[serde(default)]
    pub big_picture_evidence_ids: Vec<String>,
    #[serde(default)]
    pub bullets: Vec<RawBullet>,
    #[serde(default)]
    pub risk_flags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBullet {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub evidence_ids: Vec<String>,
    #[serde(default)]
    pub entity: Option<String>,
}

/// Turn a raw model draft into a validated [`SectionDraft`].
///
/// Every evidence-id list is normalized, validated against the pack, and —
/// when empty — recovered from the prose or filled by round-robin fallback
/// assignment. Inline markers are stripped from all rendered text.
pub fn postprocess_draft(
    section_id: &str,
    raw: RawDraft,
    pack: &EvidencePack,
    bullet_cap: usize,
) -> SectionDraft {
    let known = pack.id_set();
    let mut assigner = FallbackAssigner::new(pack.evidence_ids());

    let headline = raw
        .headline
        .map(|h| strip_markers(&h))
        .filter(|h| !h.is_empty());

    let mut big_picture_ids = normalize_ids(raw.big_picture_evidence_ids.iter());
    if big_picture_ids.is_empty() {
        big_picture_ids = extract_ids(&raw.big_picture);
    }
    let mut big_picture_ids = validate_ids(&big_picture_ids, &known);
    if big_picture_ids.is_empty() {
        big_picture_ids = assigner.assign(BIG_PICTURE_FALLBACK_IDS.min(pack.len()));
    }

    let mut bullets = Vec::new();
    for raw_bullet in raw.bullets.into_iter().take(bullet_cap) {
        let mut ids = normalize_ids(raw_bullet.evidence_ids.iter());
        if ids.is_empty() {
            ids = extract_ids(&raw_bullet.text);
        }
        let mut ids = validate_ids(&ids, &known);
        if ids.is_empty() && !pack.is_empty() {
            ids = assigner.assign(1);
        }
        bullets.push(Bullet {
            text: strip_markers(&raw_bullet.text),
            evidence_ids: ids,
            entity: raw_bullet.entity,
        });
    }

    let mut risk_flags = raw.risk_flags;
    if assigner.was_used() {
        risk_flags.push(AUTO_ASSIGN_RISK_FLAG.to_string());
    }

    SectionDraft {
        section_id: section_id.to_string(),
        headline,
        big_picture: strip_markers(&raw.big_picture),
        big_picture_evidence_ids: big_picture_ids,
        bullets,
        risk_flags,
    }
}

/// Parse a collaborator response into the raw draft shape.
fn parse_draft(response: &str) -> Option<RawDraft> {
    extract_json(response).and_then(|value| serde_json::from_value(value).ok())
}

/// Serialize the pack into the prompt's evidence block, capping text.
fn evidence_block(pack: &EvidencePack) -> String {
    let entries: Vec<serde_json::Value> = pack
        .items()
        .iter()
        .map(|item| {
            let text = item.text.as_deref().unwrap_or("");
            let capped: String = text.chars().take(PROMPT_TEXT_CAP).collect();
            serde_json::json!({
                "evidence_id": item.id,
                "title": item.title,
                "text": capped,
                "url": item.url,
                "source_name": item.source_name,
            })
        })
        .collect();
    serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string())
}

/// Live drafting collaborator.
pub struct LlmDrafter {
    client: ChatClient,
    model: String,
}

impl LlmDrafter {
    pub fn new(client: ChatClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    fn build_prompt(
        &self,
        section: &SectionSpec,
        pack: &EvidencePack,
        constraints: &DraftConstraints,
    ) -> String {
        let style = constraints
            .style_prompt
            .as_deref()
            .map(|s| format!("- Additional style guidance: {s}"))
            .unwrap_or_default();
        DRAFT_SYSTEM_PROMPT
            .replace("{section_name}", &section.display_name)
            .replace("{bullet_count}", &constraints.bullet_count.to_string())
            .replace("{entities}", &section.entities.join(", "))
            .replace("{start}", &constraints.window.start.to_string())
            .replace("{end}", &constraints.window.end.to_string())
            .replace("{voice}", &constraints.voice_profile)
            .replace("{region}", constraints.region_focus.as_deref().unwrap_or("Global"))
            .replace("{style}", &style)
            .replace("{evidence}", &evidence_block(pack))
    }
}

#[async_trait]
impl Drafter for LlmDrafter {
    async fn draft(
        &self,
        section: &SectionSpec,
        pack: &EvidencePack,
        constraints: &DraftConstraints,
    ) -> ChronicleResult<SectionDraft> {
        let system = self.build_prompt(section, pack, constraints);
        let response = match self
            .client
            .complete(
                "drafter",
                &self.model,
                0.3,
                &system,
                "Draft the section from the evidence provided.",
            )
            .await
        {
            Ok(content) => content,
            Err(e) => {
                warn!(section = %section.id, error = %e, "drafter call failed, degrading");
                return Ok(SectionDraft::degraded(
                    &section.id,
                    "Collaborator draft response could not be parsed.",
                ));
            }
        };

        let Some(raw) = parse_draft(&response) else {
            warn!(section = %section.id, "drafter response was not parseable, degrading");
            return Ok(SectionDraft::degraded(
                &section.id,
                "Collaborator draft response could not be parsed.",
            ));
        };

        Ok(postprocess_draft(&section.id, raw, pack, constraints.bullet_count))
    }
}
