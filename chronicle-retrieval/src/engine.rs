//! AcquisitionEngine: fan-out/fan-in retrieval under a call budget.
//!
//! Phase 1: all search queries run concurrently, results merge in issue
//! order after date resolution and window filtering.
//! Phase 2: up to a fixed number of pack items with a URL but no full text
//! are fetched concurrently and re-checked against the window; failures
//! purge their earlier snippet evidence.

use std::sync::Arc;

use chronicle_core::constants::{FETCH_RESERVE, MAX_ARTICLE_FETCHES, MAX_SEARCH_RESULTS};
use chronicle_core::models::budget::CallBudget;
use chronicle_core::models::window::TimeWindow;
use chronicle_core::traits::{ArticleFetcher, SearchProvider};
use chronicle_evidence::normalize::normalize_url;
use chronicle_evidence::{ensure_publish_date, is_outside_window, DatePolicy, EvidencePack};
use tracing::{debug, info, warn};

/// Runs one acquisition pass per section.
///
/// Providers are behind `Arc<dyn ..>` so search and fetch tasks can be
/// spawned onto the runtime; the pack itself is only touched by the merge
/// step after each batch completes.
pub struct AcquisitionEngine {
    search: Arc<dyn SearchProvider>,
    fetcher: Arc<dyn ArticleFetcher>,
}

impl AcquisitionEngine {
    pub fn new(search: Arc<dyn SearchProvider>, fetcher: Arc<dyn ArticleFetcher>) -> Self {
        Self { search, fetcher }
    }

    /// Produce an evidence pack for `section_id`.
    ///
    /// Budget enforcement happens before dispatch: once the budget is
    /// spent no further task is scheduled. Provider failures are logged
    /// and skipped; this function never fails because a provider did.
    pub async fn acquire(
        &self,
        section_id: &str,
        queries: &[String],
        mut budget: CallBudget,
        window: &TimeWindow,
        policy: DatePolicy,
    ) -> EvidencePack {
        let mut pack = EvidencePack::new(section_id);
        // A day of slack so providers with day-granular filters do not
        // drop items published on the window start.
        let window_days = Some(window.days() + 1);

        // Phase 1: concurrent search, merged in issue order.
        let search_budget = budget.limit().saturating_sub(FETCH_RESERVE).max(1) as usize;
        let mut handles = Vec::new();
        for query in queries.iter().take(search_budget) {
            if !budget.try_consume(1) {
                debug!(section = section_id, "budget spent, skipping remaining queries");
                break;
            }
            let search = Arc::clone(&self.search);
            let query = query.clone();
            handles.push((
                query.clone(),
                tokio::spawn(async move {
                    search.search(&query, MAX_SEARCH_RESULTS, window_days).await
                }),
            ));
        }

        for (query, handle) in handles {
            let items = match handle.await {
                Ok(Ok(items)) => items,
                Ok(Err(e)) => {
                    warn!(section = section_id, query, error = %e, "search failed, skipping");
                    continue;
                }
                Err(e) => {
                    warn!(section = section_id, query, error = %e, "search task panicked, skipping");
                    continue;
                }
            };
            for mut item in items {
                ensure_publish_date(&mut item);
                if is_outside_window(&item, window, policy) {
                    debug!(section = section_id, id = %item.id, "dropped out-of-window result");
                    continue;
                }
                pack.add(item);
            }
        }

        // Phase 2: bounded concurrent article fetches.
        let candidates: Vec<String> = pack
            .items()
            .iter()
            .filter(|i| i.url.is_some() && i.text.is_none())
            .take(MAX_ARTICLE_FETCHES)
            .filter_map(|i| i.url.clone())
            .collect();

        let mut fetch_handles = Vec::new();
        for url in candidates {
            if !budget.try_consume(1) {
                debug!(section = section_id, "budget spent, skipping remaining fetches");
                break;
            }
            let fetcher = Arc::clone(&self.fetcher);
            let target = url.clone();
            fetch_handles.push((
                url,
                tokio::spawn(async move { fetcher.fetch(&target).await }),
            ));
        }

        let mut excluded_urls: Vec<String> = Vec::new();
        let mut fetched = Vec::new();
        for (url, handle) in fetch_handles {
            let item = match handle.await {
                Ok(Ok(Some(item))) => item,
                Ok(Ok(None)) => {
                    debug!(section = section_id, url, "article yielded no usable evidence");
                    continue;
                }
                Ok(Err(e)) => {
                    warn!(section = section_id, url, error = %e, "fetch failed, skipping");
                    continue;
                }
                Err(e) => {
                    warn!(section = section_id, url, error = %e, "fetch task panicked, skipping");
                    continue;
                }
            };
            fetched.push((url, item));
        }

        for (url, mut item) in fetched {
            ensure_publish_date(&mut item);
            if is_outside_window(&item, window, policy) {
                // Full text revealed the source violates the window, so
                // the earlier snippet for this URL must go too.
                excluded_urls.push(normalize_url(&url));
                continue;
            }
            // Upgrade the snippet to the full article under the same
            // source slot.
            let key = normalize_url(&url);
            pack.retain(|existing| {
                existing.url.as_deref().map(normalize_url) != Some(key.clone())
            });
            pack.add(item);
        }

        if !excluded_urls.is_empty() {
            info!(
                section = section_id,
                excluded = excluded_urls.len(),
                "purging snippet evidence for out-of-window articles"
            );
            pack.retain(|existing| {
                let url_excluded = existing
                    .url
                    .as_deref()
                    .map(normalize_url)
                    .is_some_and(|key| excluded_urls.contains(&key));
                !url_excluded && !is_outside_window(existing, window, policy)
            });
        }

        info!(
            section = section_id,
            items = pack.len(),
            calls_used = budget.used(),
            "acquisition complete"
        );
        pack
    }
}
