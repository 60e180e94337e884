//! Generation Provider Port - Interface for the text-generation API.
//!
//! Abstracts the remote generation endpoint so call sites can be exercised
//! against a scripted mock. Implementations translate between this contract
//! and the provider-specific wire format.
//!
//! # Example
//!
//! ```ignore
//! let request = GenerationRequest::new(prompt)
//!     .with_system_instruction(system)
//!     .with_temperature(0.3)
//!     .with_max_output_tokens(8192)
//!     .with_timeout(Duration::from_secs(40))
//!     .with_max_retries(1);
//!
//! let text = provider.generate(request).await?;
//! ```

use async_trait::async_trait;
use std::time::Duration;

/// Port for text-generation calls.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate text for a single prompt.
    ///
    /// Returns the raw generated text; callers own any JSON recovery and
    /// validation of it.
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError>;
}

/// Request for text generation.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// User prompt.
    pub prompt: String,
    /// Optional system instruction guiding model behavior.
    pub system_instruction: Option<String>,
    /// Sampling temperature; omitted from the wire request when None.
    pub temperature: Option<f32>,
    /// Maximum output size; omitted from the wire request when None.
    pub max_output_tokens: Option<u32>,
    /// Hard per-attempt timeout. None means the provider's transport
    /// default applies.
    pub timeout: Option<Duration>,
    /// Extra attempts after the first. Quota errors are never retried
    /// regardless of budget.
    pub max_retries: u32,
}

impl GenerationRequest {
    /// Creates a single-attempt request with no generation parameters.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
            temperature: None,
            max_output_tokens: None,
            timeout: None,
            max_retries: 0,
        }
    }

    /// Sets the system instruction.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the maximum output size.
    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }

    /// Sets the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the retry budget (extra attempts after the first).
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }
}

/// Generation call errors.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Rate/usage limit hit upstream. Never retried; surfaced distinctly so
    /// the UI can render quota-specific guidance.
    #[error("generation quota exceeded: {message}")]
    Quota {
        /// Upstream error message.
        message: String,
    },

    /// Non-success HTTP status other than quota exhaustion.
    #[error("generation API error (status {status}): {body}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Raw error body.
        body: String,
    },

    /// Success envelope with an empty or missing text field.
    #[error("empty response from generation API")]
    EmptyResponse,

    /// Per-attempt timeout elapsed and the in-flight request was cancelled.
    #[error("generation request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Transport-level failure before a status was received.
    #[error("network error: {0}")]
    Network(String),
}

impl GenerationError {
    /// Creates a quota error.
    pub fn quota(message: impl Into<String>) -> Self {
        Self::Quota {
            message: message.into(),
        }
    }

    /// Creates an upstream error.
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Returns true if this is the distinguished quota kind.
    pub fn is_quota(&self) -> bool {
        matches!(self, GenerationError::Quota { .. })
    }

    /// Returns true if a retry is allowed for this error. Everything except
    /// quota exhaustion is retryable within the request's budget.
    pub fn is_retryable(&self) -> bool {
        !self.is_quota()
    }
}
