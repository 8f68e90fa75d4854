//! Retrieval provider seams.
//!
//! The acquisition engine talks to search and fetch through these traits so
//! tests can substitute deterministic providers for the networked ones.

mod retrieval;

pub use retrieval::{ArticleFetcher, SearchProvider};
