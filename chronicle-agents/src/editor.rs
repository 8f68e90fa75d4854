//! Editing collaborator: final cross-section voice/consistency pass.

use std::collections::HashMap;

use async_trait::async_trait;
use chronicle_core::errors::{ChronicleError, ChronicleResult};
use chronicle_core::models::section::{Bullet, SectionDraft};
use serde::Deserialize;
use tracing::warn;

use crate::traits::{EditOutcome, Editor};
use crate::wire::{extract_json, ChatClient};

const EDIT_SYSTEM_PROMPT: &str = "\
You are an editor performing a final polish pass over a briefing report.

## Your task
- Harmonize tone and voice across sections.
- Shorten or rearrange sentences for readability.
- Fix stylistic inconsistencies.

## Critical constraints
- DO NOT add new facts or claims.
- DO NOT remove evidence citations.
- If you find an unsupported claim, report it - do not silently fix it.

## Voice profile
{voice}

## Style guidelines
{style}

## Sections
{sections}

## Output format
Respond with JSON:
{\"sections\": {\"<section_id>\": {\"big_picture\": \"...\", \
\"big_picture_evidence_ids\": [\"ev_xxx\"], \
\"bullets\": [{\"text\": \"...\", \"evidence_ids\": [\"ev_xxx\"], \"entity\": null}]}}, \
\"changes_made\": [\"...\"], \"unsupported_claims_found\": []}";

const SKIPPED_ENTRY: &str = "Editorial pass skipped: response could not be parsed.";

#[derive(Debug, Default, Deserialize)]
struct RawEdit {
    #[serde(default)]
    sections: HashMap<String, RawEditedSection>,
    #[serde(default)]
    changes_made: Vec<String>,
    #[serde(default)]
    unsupported_claims_found: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawEditedSection {
    #[serde(default)]
    big_picture: Option<String>,
    #[serde(default)]
    big_picture_evidence_ids: Option<Vec<String>>,
    #[serde(default)]
    bullets: Vec<RawEditedBullet>,
}

#[derive(Debug, Deserialize)]
struct RawEditedBullet {
    #[serde(default)]
    text: String,
    #[serde(default)]
    evidence_ids: Vec<String>,
    #[serde(default)]
    entity: Option<String>,
}

/// Parse a collaborator response into the raw edit shape.
fn parse_edit(response: &str) -> Option<RawEdit> {
    extract_json(response).and_then(|value| serde_json::from_value(value).ok())
}

/// Merge the editor's output over the originals.
///
/// Sections missing from the response, and fields the editor omitted,
/// keep their pre-edit values. Risk flags always survive the pass.
fn apply_edits(drafts: &[SectionDraft], raw: RawEdit) -> EditOutcome {
    let mut edited = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let Some(section) = raw.sections.get(&draft.section_id) else {
            edited.push(draft.clone());
            continue;
        };
        let bullets: Vec<Bullet> = section
            .bullets
            .iter()
            .map(|b| Bullet {
                text: b.text.clone(),
                evidence_ids: b.evidence_ids.clone(),
                entity: b.entity.clone(),
            })
            .collect();
        edited.push(SectionDraft {
            section_id: draft.section_id.clone(),
            headline: draft.headline.clone(),
            big_picture: section
                .big_picture
                .clone()
                .unwrap_or_else(|| draft.big_picture.clone()),
            big_picture_evidence_ids: section
                .big_picture_evidence_ids
                .clone()
                .unwrap_or_else(|| draft.big_picture_evidence_ids.clone()),
            bullets: if bullets.is_empty() {
                draft.bullets.clone()
            } else {
                bullets
            },
            risk_flags: draft.risk_flags.clone(),
        });
    }
    EditOutcome {
        drafts: edited,
        change_log: raw.changes_made,
    }
}

/// The no-op outcome used when the editor response is unusable.
fn skipped(drafts: &[SectionDraft]) -> EditOutcome {
    EditOutcome {
        drafts: drafts.to_vec(),
        change_log: vec![SKIPPED_ENTRY.to_string()],
    }
}

/// Live editing collaborator.
pub struct LlmEditor {
    client: ChatClient,
    model: String,
}

impl LlmEditor {
    pub fn new(client: ChatClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl Editor for LlmEditor {
    async fn edit(
        &self,
        drafts: &[SectionDraft],
        voice_profile: &str,
        style_prompt: Option<&str>,
    ) -> ChronicleResult<EditOutcome> {
        let sections_json =
            serde_json::to_string_pretty(drafts).unwrap_or_else(|_| "[]".to_string());
        let system = EDIT_SYSTEM_PROMPT
            .replace("{voice}", voice_profile)
            .replace("{style}", style_prompt.unwrap_or("No additional style guidelines"))
            .replace("{sections}", &sections_json);

        let response = match self
            .client
            .complete("editor", &self.model, 0.2, &system, "Edit these sections for consistency.")
            .await
        {
            Ok(content) => content,
            Err(e) => {
                warn!(error = %e, "editor call failed, returning drafts unchanged");
                return Ok(skipped(drafts));
            }
        };

        let Some(raw) = parse_edit(&response) else {
            warn!("editor response was not parseable, returning drafts unchanged");
            return Ok(skipped(drafts));
        };

        // Unsupported claims are a content-integrity failure, not a style
        // problem. This is the one place the pipeline aborts.
        if !raw.unsupported_claims_found.is_empty() {
            return Err(ChronicleError::CitationPolicy {
                claims: raw.unsupported_claims_found,
            });
        }

        Ok(apply_edits(drafts, raw))
    }
}
