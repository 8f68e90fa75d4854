use serde::{Deserialize, Serialize};

/// Review rubric scores, 0–5 per dimension.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ReviewScore {
    /// How well claims are supported by evidence.
    pub grounding: u8,
    /// Conciseness and comprehensibility.
    pub clarity: u8,
    /// Timeliness and importance.
    pub newsworthiness: u8,
    /// Avoids hype, includes caveats.
    pub balance: u8,
    /// Matches the requested voice profile.
    pub voice_fit: u8,
}

impl ReviewScore {
    /// Whether the score clears the acceptance floor.
    pub fn passes_thresholds(&self, grounding_min: u8, clarity_min: u8) -> bool {
        self.grounding >= grounding_min && self.clarity >= clarity_min
    }

    /// Clamp every dimension into the rubric range.
    pub fn clamped(mut self) -> Self {
        self.grounding = self.grounding.min(5);
        self.clarity = self.clarity.min(5);
        self.newsworthiness = self.newsworthiness.min(5);
        self.balance = self.balance.min(5);
        self.voice_fit = self.voice_fit.min(5);
        self
    }
}

/// Typed remediation instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixActionType {
    FetchSource,
    Rewrite,
    AddCitation,
    Clarify,
    AdjustTone,
}

/// A specific action to remediate a review issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixAction {
    pub action_type: FixActionType,
    pub description: String,
    /// Specific target, e.g. a bullet index or "paragraph".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Suggested retrieval query when more sources are needed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_query: Option<String>,
}

/// Remediation plan produced when a draft is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixPlan {
    pub section_id: String,
    /// Agent tag responsible for applying the fixes.
    pub target_agent: String,
    pub issues: Vec<String>,
    #[serde(default)]
    pub actions: Vec<FixAction>,
    /// Whether the listed issues block acceptance outright.
    #[serde(default)]
    pub blocking: bool,
}

/// Complete review outcome for one section and one round.
///
/// One result is retained per round per section, append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResult {
    pub section_id: String,
    pub round: u32,
    pub scores: ReviewScore,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix_plan: Option<FixPlan>,
    #[serde(default)]
    pub accepted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ReviewResult {
    /// All-zero failing review used when the reviewer's output could not
    /// be parsed. Keeps the pipeline moving with an audit note.
    pub fn degraded(section_id: impl Into<String>, round: u32, note: impl Into<String>) -> Self {
        Self {
            section_id: section_id.into(),
            round,
            scores: ReviewScore::default(),
            issues: vec!["Review response could not be parsed.".to_string()],
            fix_plan: None,
            accepted: false,
            notes: Some(note.into()),
        }
    }
}
