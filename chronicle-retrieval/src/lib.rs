//! # chronicle-retrieval
//!
//! Budgeted, concurrent evidence acquisition. Search queries fan out under
//! a per-section call budget, results are date-resolved, window-filtered,
//! and merged into a deduplicating pack, then a bounded number of full
//! articles are fetched and re-checked against the window.

pub mod engine;
pub mod providers;
pub mod queries;

pub use engine::AcquisitionEngine;
pub use providers::{HttpArticleFetcher, HttpSearchProvider};
pub use queries::build_search_queries;
