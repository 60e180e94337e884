//! Application-level error for the generation call sites.
//!
//! One variant per user-visible failure kind; the HTTP adapter maps these
//! onto status codes. Quota is distinguished so the UI can render
//! quota-specific guidance, and is never retried anywhere in the stack.

use thiserror::Error;

use crate::ports::GenerationError;

/// Failure kinds surfaced by clarify, produce and diagnostic-ping.
#[derive(Debug, Error)]
pub enum DecisionError {
    /// No usable generation credential was configured at startup.
    #[error("Generation API key not configured. Set the CONSENSUS__GENERATION__API_KEY environment variable.")]
    Configuration,

    /// Input rejected before any network call.
    #[error("{0}")]
    Validation(String),

    /// Upstream returned a non-success status other than quota exhaustion.
    #[error("Generation API error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    /// Upstream rate/usage limit hit; non-retryable.
    #[error("API quota exceeded: {message}")]
    Quota { message: String },

    /// Upstream succeeded but returned no text.
    #[error("Empty response from generation API")]
    EmptyResponse,

    /// No recoverable JSON in the model's reply.
    #[error("Failed to parse generation response: {0}")]
    Parse(String),

    /// Recovered JSON does not match the decision package shape.
    #[error("Response does not match expected schema")]
    Schema,

    /// Per-attempt timeout elapsed.
    #[error("Generation request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Transport-level failure.
    #[error("Failed to reach generation API: {0}")]
    Network(String),
}

impl DecisionError {
    /// True for the distinguished quota kind.
    pub fn is_quota(&self) -> bool {
        matches!(self, DecisionError::Quota { .. })
    }
}

impl From<GenerationError> for DecisionError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Quota { message } => DecisionError::Quota { message },
            GenerationError::Upstream { status, body } => DecisionError::Upstream { status, body },
            GenerationError::EmptyResponse => DecisionError::EmptyResponse,
            GenerationError::Timeout { timeout_secs } => DecisionError::Timeout { timeout_secs },
            GenerationError::Network(message) => DecisionError::Network(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_conversion_preserves_kind() {
        let err: DecisionError = GenerationError::quota("limit hit").into();
        assert!(err.is_quota());
        assert!(err.to_string().contains("limit hit"));
    }

    #[test]
    fn upstream_conversion_carries_status_and_body() {
        let err: DecisionError = GenerationError::upstream(503, "overloaded").into();
        assert!(matches!(
            err,
            DecisionError::Upstream { status: 503, .. }
        ));
    }

    #[test]
    fn only_quota_reports_as_quota() {
        assert!(!DecisionError::Configuration.is_quota());
        assert!(!DecisionError::Schema.is_quota());
        assert!(DecisionError::Quota {
            message: "x".to_string()
        }
        .is_quota());
    }
}
