//! Tracing subscriber setup for report-generation runs.
//!
//! Pipeline runs are batch-shaped: one process, one report, structured
//! JSON lines that downstream log tooling can group by section id.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber with structured JSON output.
///
/// Respects the `CHRONICLE_LOG` environment variable for filtering and
/// defaults to `info`. Call once, before the pipeline starts; acquisition
/// and review events carry `section` fields for correlation.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("CHRONICLE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .json()
        .init();
}

/// Initialize tracing with a fixed filter string, for tests or embedders
/// that do not want environment lookups.
pub fn init_tracing_with_filter(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .json()
        .init();
}
