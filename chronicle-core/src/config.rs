//! Pipeline configuration.
//!
//! One immutable [`ChronicleConfig`] value is constructed at process start
//! and passed down to every component that needs it. There is no ambient or
//! global configuration lookup anywhere in the workspace.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::{ChronicleError, ChronicleResult};

/// Immutable settings for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChronicleConfig {
    /// Report title used in the assembled header.
    pub report_title: String,
    /// Named tone/style target for drafting, review, and editing.
    pub voice_profile: String,
    /// Freeform style guidance forwarded to the collaborators.
    pub style_prompt: Option<String>,
    /// Optional region filter appended to search queries (e.g. "EU").
    pub region_focus: Option<String>,
    /// Retrieval call budget per section (search + fetch combined).
    pub evidence_budget: u32,
    /// Maximum review rounds before the fix loop force-terminates.
    pub max_review_rounds: u32,
    /// Minimum grounding score for acceptance.
    pub grounding_threshold: u8,
    /// Minimum clarity score for acceptance.
    pub clarity_threshold: u8,
    /// When true, evidence without a resolvable publish date is excluded.
    pub strict_date_filtering: bool,
    /// Base URL of the search provider API.
    pub search_api_url: String,
    /// API key for the search provider.
    pub search_api_key: String,
    /// Base URL of the chat-completion API backing the collaborators.
    pub model_api_url: String,
    /// API key for the chat-completion API.
    pub model_api_key: String,
    /// Model name used for drafting.
    pub model_draft: String,
    /// Model name used for review scoring.
    pub model_review: String,
    /// Model name used for the editorial pass.
    pub model_edit: String,
}

impl Default for ChronicleConfig {
    fn default() -> Self {
        Self {
            report_title: "Weekly Briefing".to_string(),
            voice_profile: constants::DEFAULT_VOICE_PROFILE.to_string(),
            style_prompt: None,
            region_focus: None,
            evidence_budget: constants::DEFAULT_EVIDENCE_BUDGET,
            max_review_rounds: constants::DEFAULT_MAX_REVIEW_ROUNDS,
            grounding_threshold: constants::DEFAULT_GROUNDING_THRESHOLD,
            clarity_threshold: constants::DEFAULT_CLARITY_THRESHOLD,
            strict_date_filtering: false,
            search_api_url: "https://api.tavily.com/search".to_string(),
            search_api_key: String::new(),
            model_api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            model_api_key: String::new(),
            model_draft: "gpt-4o".to_string(),
            model_review: "gpt-4o".to_string(),
            model_edit: "gpt-4o".to_string(),
        }
    }
}

impl ChronicleConfig {
    /// Parse a config from TOML, validating the tunable ranges.
    pub fn from_toml(input: &str) -> ChronicleResult<Self> {
        let config: Self =
            toml::from_str(input).map_err(|e| ChronicleError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ChronicleResult<()> {
        if self.max_review_rounds == 0 {
            return Err(ChronicleError::Config(
                "max_review_rounds must be at least 1".to_string(),
            ));
        }
        if self.grounding_threshold > 5 || self.clarity_threshold > 5 {
            return Err(ChronicleError::Config(
                "rubric thresholds must be in 0..=5".to_string(),
            ));
        }
        Ok(())
    }
}
