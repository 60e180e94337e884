//! Clarify handler: asks the model for 2-4 clarifying questions.

use std::sync::Arc;

use tracing::{error, info};

use crate::application::error::DecisionError;
use crate::domain::decision::{extract_json, prompts, ClarifyingQuestion, Constraints};
use crate::ports::{GenerationProvider, GenerationRequest};

use super::MIN_PROBLEM_CHARS;

/// Sampling temperature for the lighter clarify call.
const CLARIFY_TEMPERATURE: f32 = 0.7;
/// Output budget for a short question list.
const CLARIFY_MAX_OUTPUT_TOKENS: u32 = 1024;

/// Command to generate clarifying questions.
#[derive(Debug, Clone)]
pub struct ClarifyCommand {
    pub problem: String,
    pub constraints: Constraints,
}

/// Handles clarify commands. Single attempt, no explicit timeout.
pub struct ClarifyHandler {
    /// None when no credential was configured at startup.
    provider: Option<Arc<dyn GenerationProvider>>,
}

impl ClarifyHandler {
    pub fn new(provider: Option<Arc<dyn GenerationProvider>>) -> Self {
        Self { provider }
    }

    pub async fn handle(&self, cmd: ClarifyCommand) -> Result<Vec<ClarifyingQuestion>, DecisionError> {
        let provider = self.provider.as_ref().ok_or(DecisionError::Configuration)?;

        if cmd.problem.trim().chars().count() < MIN_PROBLEM_CHARS {
            return Err(DecisionError::Validation(format!(
                "Problem description must be at least {} characters",
                MIN_PROBLEM_CHARS
            )));
        }

        info!(
            problem_length = cmd.problem.len(),
            "generating clarifying questions"
        );

        let prompt = prompts::clarify_prompt(&cmd.problem, &cmd.constraints);
        let request = GenerationRequest::new(prompt)
            .with_temperature(CLARIFY_TEMPERATURE)
            .with_max_output_tokens(CLARIFY_MAX_OUTPUT_TOKENS);

        let raw = provider.generate(request).await?;

        let value = extract_json(&raw).map_err(|e| {
            error!(raw = %preview(&raw), "failed to parse clarifying questions");
            DecisionError::Parse(e.to_string())
        })?;

        let questions: Vec<ClarifyingQuestion> = serde_json::from_value(value).map_err(|e| {
            error!(raw = %preview(&raw), "clarifying questions had unexpected shape");
            DecisionError::Parse(e.to_string())
        })?;

        info!(count = questions.len(), "generated clarifying questions");
        Ok(questions)
    }
}

/// First few hundred characters of a raw reply, for error logs.
pub(super) fn preview(raw: &str) -> String {
    raw.chars().take(500).collect()
}
