//! Networked retrieval providers.
//!
//! `HttpSearchProvider` speaks a Tavily-style JSON search contract;
//! `HttpArticleFetcher` pulls a page and reduces it to cleaned text.
//! Both assign a reliability tier from the source domain.

use std::sync::LazyLock;

use async_trait::async_trait;
use chronicle_core::constants::ARTICLE_TEXT_CAP;
use chronicle_core::errors::{ChronicleResult, RetrievalError};
use chronicle_core::models::evidence::{EvidenceItem, Reliability, SourceType};
use chronicle_core::traits::{ArticleFetcher, SearchProvider};
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

const HIGH_RELIABILITY_DOMAINS: &[&str] = &[
    "reuters.com",
    "bloomberg.com",
    "ft.com",
    "wsj.com",
    "datacenterknowledge.com",
    "datacenterdynamics.com",
    "capacitymedia.com",
    "fiercetelecom.com",
    "lightreading.com",
];

const MEDIUM_RELIABILITY_DOMAINS: &[&str] = &[
    "techcrunch.com",
    "zdnet.com",
    "theregister.com",
    "arstechnica.com",
];

/// Reliability tier for a search snippet, judged by domain alone.
/// Unknown domains rate medium; only full-article fetching can demote.
pub fn snippet_reliability(url: &str) -> Reliability {
    let url = url.to_lowercase();
    if HIGH_RELIABILITY_DOMAINS.iter().any(|d| url.contains(d)) {
        Reliability::High
    } else {
        Reliability::Medium
    }
}

/// Reliability tier for a fetched article: domain first, then content
/// depth (thin articles from unknown domains rate low).
pub fn article_reliability(url: &str, text: &str) -> Reliability {
    let lowered = url.to_lowercase();
    if HIGH_RELIABILITY_DOMAINS.iter().any(|d| lowered.contains(d)) {
        Reliability::High
    } else if MEDIUM_RELIABILITY_DOMAINS.iter().any(|d| lowered.contains(d)) || text.len() > 500 {
        Reliability::Medium
    } else {
        Reliability::Low
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    url: Option<String>,
    title: Option<String>,
    content: Option<String>,
}

/// Search provider backed by a Tavily-style JSON API.
pub struct HttpSearchProvider {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl HttpSearchProvider {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl SearchProvider for HttpSearchProvider {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        window_days: Option<i64>,
    ) -> ChronicleResult<Vec<EvidenceItem>> {
        let mut body = serde_json::json!({
            "api_key": self.api_key,
            "query": query,
            "max_results": max_results,
            "search_depth": "advanced",
            "include_raw_content": false,
        });
        if let Some(days) = window_days {
            body["days"] = serde_json::json!(days);
        }

        let response = self
            .client
            .post(&self.api_url)
            .json(&body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| RetrievalError::SearchFailed {
                query: query.to_string(),
                reason: e.to_string(),
            })?;

        let parsed: SearchResponse =
            response
                .json()
                .await
                .map_err(|e| RetrievalError::SearchFailed {
                    query: query.to_string(),
                    reason: e.to_string(),
                })?;

        debug!(query, results = parsed.results.len(), "search returned");

        Ok(parsed
            .results
            .into_iter()
            .map(|r| {
                let reliability = r
                    .url
                    .as_deref()
                    .map(snippet_reliability)
                    .unwrap_or(Reliability::Medium);
                let mut item = EvidenceItem::new(SourceType::Web, "web_search")
                    .with_reliability(reliability)
                    .with_tag("search_result");
                item.url = r.url;
                item.title = r.title;
                item.text = r.content;
                item
            })
            .collect())
    }
}

static RE_SCRIPT_BLOCKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style|noscript)\b.*?</(script|style|noscript)>").unwrap()
});
static RE_TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]+>").unwrap());
static RE_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());

/// Reduce an HTML page to whitespace-normalized text, capped at
/// [`ARTICLE_TEXT_CAP`] characters.
fn extract_text(html: &str) -> String {
    let without_blocks = RE_SCRIPT_BLOCKS.replace_all(html, " ");
    let without_tags = RE_TAGS.replace_all(&without_blocks, " ");
    let mut text = without_tags
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if text.len() > ARTICLE_TEXT_CAP {
        let mut cut = ARTICLE_TEXT_CAP;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
    }
    text
}

fn extract_title(html: &str) -> Option<String> {
    let title = RE_TITLE.captures(html)?.get(1)?.as_str().trim().to_string();
    (!title.is_empty()).then_some(title)
}

/// Article fetcher that downloads a page and strips it to text.
pub struct HttpArticleFetcher {
    client: reqwest::Client,
}

impl HttpArticleFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpArticleFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleFetcher for HttpArticleFetcher {
    async fn fetch(&self, url: &str) -> ChronicleResult<Option<EvidenceItem>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| RetrievalError::FetchFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let html = response
            .text()
            .await
            .map_err(|e| RetrievalError::FetchFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let text = extract_text(&html);
        if text.is_empty() {
            return Ok(None);
        }

        let reliability = article_reliability(url, &text);
        let mut item = EvidenceItem::new(SourceType::News, "article_fetch")
            .with_url(url)
            .with_text(text)
            .with_reliability(reliability)
            .with_tag("full_article");
        item.title = extract_title(&html);
        Ok(Some(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_reliability_tiers() {
        assert_eq!(
            snippet_reliability("https://www.reuters.com/a"),
            Reliability::High
        );
        assert_eq!(
            snippet_reliability("https://techcrunch.com/a"),
            Reliability::Medium
        );
        assert_eq!(
            snippet_reliability("https://someblog.example/a"),
            Reliability::Medium
        );
    }

    #[test]
    fn thin_articles_rate_low() {
        assert_eq!(article_reliability("https://x.example/a", "short"), Reliability::Low);
        assert_eq!(
            article_reliability("https://ft.com/a", "short"),
            Reliability::High
        );
    }

    #[test]
    fn extract_text_drops_markup_and_scripts() {
        let html = "<html><head><title>Story Title</title>\
                    <script>var x = 1;</script></head>\
                    <body><p>First  paragraph.</p><p>Second.</p></body></html>";
        assert_eq!(extract_text(html), "Story Title First paragraph. Second.");
        assert_eq!(extract_title(html).as_deref(), Some("Story Title"));
    }

    #[test]
    fn extract_text_caps_length() {
        let html = format!("<body>{}</body>", "word ".repeat(5_000));
        assert!(extract_text(&html).len() <= ARTICLE_TEXT_CAP);
    }
}
