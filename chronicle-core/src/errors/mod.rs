//! Error taxonomy for the chronicle workspace.
//!
//! Subsystem errors are recovered close to where they occur; only
//! [`ChronicleError::CitationPolicy`] is expected to escape a pipeline run.

mod collaborator_error;
mod retrieval_error;

pub use collaborator_error::CollaboratorError;
pub use retrieval_error::RetrievalError;

/// Top-level error for the chronicle workspace.
#[derive(Debug, thiserror::Error)]
pub enum ChronicleError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    /// The editor reported claims with no evidence backing. This is a
    /// content-integrity failure, not a quality rejection, and aborts the run.
    #[error("citation policy violation: unsupported claims reported: {claims:?}")]
    CitationPolicy { claims: Vec<String> },

    #[error("invalid time window: start {start} is after end {end}")]
    InvalidWindow {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("config error: {0}")]
    Config(String),

    /// A controller invariant was broken, e.g. an illegal state-machine
    /// transition. Indicates a bug in the caller, not bad input.
    #[error("pipeline state error: {0}")]
    Pipeline(String),
}

/// Convenience alias used across the workspace.
pub type ChronicleResult<T> = Result<T, ChronicleError>;
