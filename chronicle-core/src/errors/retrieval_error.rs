/// Retrieval subsystem errors.
///
/// All variants are recovered inside the acquisition engine: a failing
/// search or fetch is logged and skipped, never propagated to the caller.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("search failed for query {query:?}: {reason}")]
    SearchFailed { query: String, reason: String },

    #[error("article fetch failed for {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    /// Normal termination condition for the acquisition loop, not a fault.
    #[error("retrieval call budget exhausted")]
    BudgetExhausted,
}
