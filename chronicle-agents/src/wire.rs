//! Chat-completion wire plumbing shared by the live collaborators.

use chronicle_core::errors::{ChronicleResult, CollaboratorError};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Thin client over a chat-completion JSON API.
#[derive(Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl ChatClient {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    /// One blocking round-trip: system + user message in, raw text out.
    pub async fn complete(
        &self,
        agent: &str,
        model: &str,
        temperature: f32,
        system: &str,
        user: &str,
    ) -> ChronicleResult<String> {
        let body = serde_json::json!({
            "model": model,
            "temperature": temperature,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
        });

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CollaboratorError::transport(agent, e.to_string()))?;

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| CollaboratorError::malformed(agent, e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| CollaboratorError::malformed(agent, "empty choices"))?;

        debug!(agent, model, chars = content.len(), "collaborator responded");
        Ok(content)
    }
}

/// Pull the JSON payload out of a collaborator response, tolerating
/// markdown code fences around it.
pub fn extract_json(content: &str) -> Option<serde_json::Value> {
    let inner = if let Some(start) = content.find("```json") {
        let rest = &content[start + 7..];
        rest.split("```").next().unwrap_or(rest)
    } else if let Some(start) = content.find("```") {
        let rest = &content[start + 3..];
        rest.split("```").next().unwrap_or(rest)
    } else {
        content
    };
    serde_json::from_str(inner.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_json() {
        let value = extract_json(r#"{"a": 1}"#).unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn parses_json_fenced_blocks() {
        let content = "Here you go:\n```json\n{\"a\": 1}\n```\nDone.";
        let value = extract_json(content).unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn parses_anonymous_fences() {
        let content = "```\n{\"b\": [1, 2]}\n```";
        let value = extract_json(content).unwrap();
        assert_eq!(value["b"][1], 2);
    }

    #[test]
    fn garbage_yields_none() {
        assert!(extract_json("not json at all").is_none());
        assert!(extract_json("```json\nstill not json\n```").is_none());
    }
}
