//! Mock Generation Provider for testing.
//!
//! Configurable mock implementation of the GenerationProvider port, letting
//! call sites and the retry policy be exercised without a real API.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockGenerationProvider::new()
//!     .with_response(r#"[{"id":"q1","question":"Why?"}]"#);
//!
//! let text = provider.generate(request).await?;
//! assert_eq!(provider.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{GenerationError, GenerationProvider, GenerationRequest};

/// A configured mock outcome, consumed in order.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Return this text.
    Success(String),
    /// Fail with this error kind.
    Quota { message: String },
    Upstream { status: u16, body: String },
    EmptyResponse,
    Timeout { timeout_secs: u64 },
    Network { message: String },
}

impl From<MockOutcome> for Result<String, GenerationError> {
    fn from(outcome: MockOutcome) -> Self {
        match outcome {
            MockOutcome::Success(text) => Ok(text),
            MockOutcome::Quota { message } => Err(GenerationError::quota(message)),
            MockOutcome::Upstream { status, body } => Err(GenerationError::upstream(status, body)),
            MockOutcome::EmptyResponse => Err(GenerationError::EmptyResponse),
            MockOutcome::Timeout { timeout_secs } => {
                Err(GenerationError::Timeout { timeout_secs })
            }
            MockOutcome::Network { message } => Err(GenerationError::network(message)),
        }
    }
}

/// Mock generation provider for testing.
///
/// Note: the mock consumes one scripted outcome per `generate` call — the
/// caller's retry loop lives above the port, so a retried call observes the
/// next outcome in the queue.
#[derive(Debug, Clone, Default)]
pub struct MockGenerationProvider {
    /// Pre-configured outcomes (consumed in order).
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    /// Simulated latency per call.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockGenerationProvider {
    /// Creates a new mock provider with no scripted outcomes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.with_outcome(MockOutcome::Success(text.into()))
    }

    /// Queues an arbitrary outcome.
    pub fn with_outcome(self, outcome: MockOutcome) -> Self {
        self.outcomes.lock().unwrap().push_back(outcome);
        self
    }

    /// Adds simulated latency to every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of `generate` calls observed.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Copy of the recorded requests.
    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationProvider for MockGenerationProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.calls.lock().unwrap().push(request);

        let outcome = self.outcomes.lock().unwrap().pop_front();
        match outcome {
            Some(outcome) => outcome.into(),
            None => Err(GenerationError::network("mock: no scripted outcome left")),
        }
    }
}
