use async_trait::async_trait;

use crate::errors::ChronicleResult;
use crate::models::evidence::EvidenceItem;

/// Web search provider.
///
/// Best-effort: implementations may return an empty list on provider
/// failure; the acquisition engine also tolerates `Err` by skipping the
/// query.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run one search query.
    ///
    /// `window_days` restricts results to the last N days when the
    /// backing provider supports it.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        window_days: Option<i64>,
    ) -> ChronicleResult<Vec<EvidenceItem>>;
}

/// Full-article fetcher.
#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    /// Fetch and clean one article. `Ok(None)` means the article could not
    /// be parsed into usable evidence.
    async fn fetch(&self, url: &str) -> ChronicleResult<Option<EvidenceItem>>;
}
