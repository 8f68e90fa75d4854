/// Errors from the drafting, review, and editing collaborators.
///
/// Malformed output degrades locally (minimal draft, zero-score review,
/// skipped edit pass); transport failures are treated the same way.
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("{agent} returned a response that could not be parsed: {reason}")]
    MalformedResponse { agent: String, reason: String },

    #[error("{agent} call failed: {reason}")]
    Transport { agent: String, reason: String },
}

impl CollaboratorError {
    pub fn malformed(agent: &str, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            agent: agent.to_string(),
            reason: reason.into(),
        }
    }

    pub fn transport(agent: &str, reason: impl Into<String>) -> Self {
        Self::Transport {
            agent: agent.to_string(),
            reason: reason.into(),
        }
    }
}
