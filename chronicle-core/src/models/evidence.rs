use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of source an evidence item was retrieved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Web search snippet.
    Web,
    /// Full news article.
    News,
    /// Structured market data.
    MarketData,
}

/// Reliability tier assigned at retrieval time from the source domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reliability {
    Low,
    Medium,
    High,
}

/// One retrieved unit of information with provenance metadata.
///
/// `retrieved_at` is set at creation and never mutated. The only mutation
/// an item sees after creation is a resolved publish date written into
/// `data["publish_date"]` so window checks become O(1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Opaque unique id, `ev_` plus eight lowercase hex characters.
    pub id: String,
    pub source_type: SourceType,
    /// Name of the tool that produced this item.
    pub source_name: String,
    pub retrieved_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Cleaned text content, when the source is textual.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Structured payload for non-text data (e.g. OHLCV series).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    pub reliability: Reliability,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Generate a fresh evidence id: `ev_` + 8 lowercase hex chars.
pub fn generate_evidence_id() -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("ev_{}", &hex[..8])
}

impl EvidenceItem {
    /// Create an item with a fresh id and the retrieval timestamp set to now.
    pub fn new(source_type: SourceType, source_name: impl Into<String>) -> Self {
        Self {
            id: generate_evidence_id(),
            source_type,
            source_name: source_name.into(),
            retrieved_at: Utc::now(),
            url: None,
            title: None,
            text: None,
            data: None,
            reliability: Reliability::Medium,
            tags: Vec::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_reliability(mut self, reliability: Reliability) -> Self {
        self.reliability = reliability;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Read a string field out of the structured payload, if present.
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data.as_ref()?.get(key)?.as_str()
    }

    /// Write a string field into the structured payload, creating the
    /// payload object if the item had none.
    pub fn set_data_str(&mut self, key: &str, value: impl Into<String>) {
        let map = match self.data {
            Some(serde_json::Value::Object(ref mut map)) => map,
            _ => {
                self.data = Some(serde_json::Value::Object(serde_json::Map::new()));
                match self.data {
                    Some(serde_json::Value::Object(ref mut map)) => map,
                    _ => unreachable!(),
                }
            }
        };
        map.insert(key.to_string(), serde_json::Value::String(value.into()));
    }
}
