//! Diagnostic ping handler: one fixed-prompt round trip, timed.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::application::error::DecisionError;
use crate::domain::decision::prompts::DIAGNOSTIC_PROMPT;
use crate::ports::{GenerationProvider, GenerationRequest};

/// Handles diagnostic pings against the generation API. No generation
/// parameters, no retry; the measured latency is the full round trip.
pub struct DiagnosticPingHandler {
    /// None when no credential was configured at startup.
    provider: Option<Arc<dyn GenerationProvider>>,
}

impl DiagnosticPingHandler {
    pub fn new(provider: Option<Arc<dyn GenerationProvider>>) -> Self {
        Self { provider }
    }

    /// Returns the round-trip latency in milliseconds.
    pub async fn handle(&self) -> Result<u64, DecisionError> {
        let provider = self.provider.as_ref().ok_or(DecisionError::Configuration)?;

        let started = Instant::now();
        provider
            .generate(GenerationRequest::new(DIAGNOSTIC_PROMPT))
            .await?;
        let latency_ms = started.elapsed().as_millis() as u64;

        info!(latency_ms, "diagnostic ping successful");
        Ok(latency_ms)
    }
}
