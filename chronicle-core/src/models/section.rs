use serde::{Deserialize, Serialize};

/// Caller-side description of one report section: identity, display name,
/// seed search queries, and the named entities the section tracks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSpec {
    /// Stable identifier, e.g. `data_centers`.
    pub id: String,
    /// Human-readable heading, e.g. `Data Centers`.
    pub display_name: String,
    /// Sector keywords seeding the search phase.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Named entities (companies, players) the section covers.
    #[serde(default)]
    pub entities: Vec<String>,
}

/// A single bullet point in a section draft.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bullet {
    pub text: String,
    /// Evidence ids supporting this bullet.
    #[serde(default)]
    pub evidence_ids: Vec<String>,
    /// Named entity this bullet covers, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
}

/// Draft of one report section.
///
/// Produced by the drafting collaborator, replaced wholesale on each
/// fix-loop round, finalized by the editing collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionDraft {
    pub section_id: String,
    /// Short punchy headline, when the drafter supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    /// The big-picture paragraph summarizing key themes.
    pub big_picture: String,
    #[serde(default)]
    pub big_picture_evidence_ids: Vec<String>,
    #[serde(default)]
    pub bullets: Vec<Bullet>,
    /// Uncertainties, gaps, or degradation notices.
    #[serde(default)]
    pub risk_flags: Vec<String>,
}

impl SectionDraft {
    /// Minimal draft used when the drafting collaborator's output could
    /// not be parsed. Carries a risk flag instead of aborting the run.
    pub fn degraded(section_id: impl Into<String>, risk_flag: impl Into<String>) -> Self {
        Self {
            section_id: section_id.into(),
            headline: None,
            big_picture: "Unable to generate section content.".to_string(),
            big_picture_evidence_ids: Vec::new(),
            bullets: Vec::new(),
            risk_flags: vec![risk_flag.into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degraded_draft_carries_risk_flag() {
        let draft = SectionDraft::degraded("towers", "parse failure");
        assert_eq!(draft.section_id, "towers");
        assert!(draft.bullets.is_empty());
        assert_eq!(draft.risk_flags, vec!["parse failure".to_string()]);
    }
}
