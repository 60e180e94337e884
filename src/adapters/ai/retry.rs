//! Retrying Generation Provider - Wrapper that applies the retry policy.
//!
//! Wraps any GenerationProvider and honors the retry budget carried by each
//! request: failed attempts are repeated with exponential backoff from a
//! 1-second base (1s, 2s, 4s, ...). Quota errors short-circuit to the
//! caller immediately, whatever the remaining budget; when the budget is
//! exhausted, the last error is re-raised.
//!
//! # Example
//!
//! ```ignore
//! let transport = GeminiProvider::new(config);
//! let provider = RetryingGenerationProvider::new(Arc::new(transport));
//! ```

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

use crate::ports::{GenerationError, GenerationProvider, GenerationRequest};

/// Retry decorator around a generation provider.
pub struct RetryingGenerationProvider {
    inner: Arc<dyn GenerationProvider>,
}

impl RetryingGenerationProvider {
    /// Wraps a provider with the retry policy.
    pub fn new(inner: Arc<dyn GenerationProvider>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl GenerationProvider for RetryingGenerationProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let mut attempt: u32 = 0;

        loop {
            match self.inner.generate(request.clone()).await {
                Ok(text) => return Ok(text),
                Err(err) => {
                    if !err.is_retryable() || attempt >= request.max_retries {
                        return Err(err);
                    }
                    // Exponential backoff: 1s, 2s, 4s, ...
                    let delay = Duration::from_secs(1 << attempt);
                    warn!(
                        attempt = attempt + 1,
                        delay_secs = delay.as_secs(),
                        error = %err,
                        "generation attempt failed, retrying"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
