//! Produce handler: generates a full decision package.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::application::error::DecisionError;
use crate::domain::decision::{
    extract_json, prompts, validate_decision_package, Constraints, DecisionPackage,
};
use crate::ports::{GenerationProvider, GenerationRequest};

use super::{clarify::preview, MIN_PROBLEM_CHARS};

/// Conservative sampling for the structured package.
const PRODUCE_TEMPERATURE: f32 = 0.3;
/// Output budget for a full package.
const PRODUCE_MAX_OUTPUT_TOKENS: u32 = 8192;

/// Command to produce a decision package.
#[derive(Debug, Clone)]
pub struct ProduceCommand {
    pub problem: String,
    pub constraints: Constraints,
    /// Clarifying answers keyed by question id.
    pub answers: Option<BTreeMap<String, String>>,
}

/// Handles produce commands: precondition checks, prompt construction, the
/// retried generation call, then extraction and structural validation. The
/// validated package is returned unchanged; nothing is clamped or fixed up.
pub struct ProduceHandler {
    /// None when no credential was configured at startup.
    provider: Option<Arc<dyn GenerationProvider>>,
    /// Hard per-attempt timeout.
    timeout: Duration,
    /// Extra attempts after the first.
    max_retries: u32,
}

impl ProduceHandler {
    pub fn new(
        provider: Option<Arc<dyn GenerationProvider>>,
        timeout: Duration,
        max_retries: u32,
    ) -> Self {
        Self {
            provider,
            timeout,
            max_retries,
        }
    }

    pub async fn handle(&self, cmd: ProduceCommand) -> Result<DecisionPackage, DecisionError> {
        let provider = self.provider.as_ref().ok_or(DecisionError::Configuration)?;

        if cmd.problem.trim().chars().count() < MIN_PROBLEM_CHARS {
            return Err(DecisionError::Validation(format!(
                "Problem description must be at least {} characters",
                MIN_PROBLEM_CHARS
            )));
        }

        info!(
            problem_length = cmd.problem.len(),
            has_answers = cmd.answers.as_ref().is_some_and(|a| !a.is_empty()),
            "generating decision package"
        );

        let prompt = prompts::produce_prompt(&cmd.problem, &cmd.constraints, cmd.answers.as_ref());
        let request = GenerationRequest::new(prompt)
            .with_system_instruction(prompts::PRODUCE_SYSTEM_INSTRUCTION)
            .with_temperature(PRODUCE_TEMPERATURE)
            .with_max_output_tokens(PRODUCE_MAX_OUTPUT_TOKENS)
            .with_timeout(self.timeout)
            .with_max_retries(self.max_retries);

        let raw = provider.generate(request).await?;

        let value = extract_json(&raw).map_err(|e| {
            error!(raw = %preview(&raw), "failed to parse decision package");
            DecisionError::Parse(e.to_string())
        })?;

        if !validate_decision_package(&value) {
            error!("decision package failed structural validation");
            return Err(DecisionError::Schema);
        }

        let package: DecisionPackage = serde_json::from_value(value).map_err(|e| {
            error!(error = %e, "validated package did not deserialize");
            DecisionError::Schema
        })?;

        info!(options = package.options.len(), "generated decision package");
        Ok(package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockGenerationProvider, MockOutcome};
    use serde_json::json;

    const PROBLEM: &str = "Should we expand into the European market this year?";

    fn package_json() -> String {
        json!({
            "title": "European expansion",
            "headline": "Enter Europe through a single beachhead market",
            "summary": "Expansion is feasible within budget if phased.",
            "options": [{
                "id": "opt1",
                "title": "Beachhead in Germany",
                "description": "Start with one market",
                "pros": ["Focused spend"],
                "cons": ["Slower coverage"],
                "estimated_cost": "$300,000",
                "estimated_time_weeks": 20,
                "success_probability": 65
            }],
            "recommended_plan": [{
                "step_number": 1,
                "action": "Hire a country lead",
                "owner": "COO",
                "estimated_time_days": 30
            }],
            "scenarios": {
                "best": "Profitable within a year",
                "expected": "Break even in 18 months",
                "worst": "Withdraw after pilot"
            },
            "stakeholder_messages": [{
                "stakeholder": "Board",
                "channel": "email",
                "tone": "formal",
                "message": "We recommend a phased expansion."
            }],
            "metrics": [{
                "metric_name": "Monthly recurring revenue",
                "target": "$100k",
                "measure_frequency": "monthly"
            }],
            "processing_notes": null
        })
        .to_string()
    }

    fn handler_with(mock: &MockGenerationProvider) -> ProduceHandler {
        ProduceHandler::new(Some(Arc::new(mock.clone())), Duration::from_secs(40), 1)
    }

    fn command() -> ProduceCommand {
        ProduceCommand {
            problem: PROBLEM.to_string(),
            constraints: Constraints {
                budget: Some("$500,000".to_string()),
                timeframe: Some("6 months".to_string()),
                ..Default::default()
            },
            answers: None,
        }
    }

    #[tokio::test]
    async fn missing_credential_fails_before_any_call() {
        let handler = ProduceHandler::new(None, Duration::from_secs(40), 1);
        let err = handler.handle(command()).await.unwrap_err();
        assert!(matches!(err, DecisionError::Configuration));
    }

    #[tokio::test]
    async fn short_problem_fails_without_network_call() {
        let mock = MockGenerationProvider::new();
        let handler = handler_with(&mock);

        let err = handler
            .handle(ProduceCommand {
                problem: "short".to_string(),
                constraints: Constraints::default(),
                answers: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DecisionError::Validation(_)));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn returns_validated_package() {
        let mock = MockGenerationProvider::new().with_response(package_json());
        let handler = handler_with(&mock);

        let package = handler.handle(command()).await.unwrap();

        assert_eq!(package.title, "European expansion");
        assert_eq!(package.options.len(), 1);
        assert_eq!(package.options[0].success_probability, 65.0);
    }

    #[tokio::test]
    async fn accepts_package_wrapped_in_code_fence() {
        let mock = MockGenerationProvider::new()
            .with_response(format!("```json\n{}\n```", package_json()));
        let handler = handler_with(&mock);

        let package = handler.handle(command()).await.unwrap();
        assert_eq!(package.scenarios.worst, "Withdraw after pilot");
    }

    #[tokio::test]
    async fn request_carries_produce_parameters() {
        let mock = MockGenerationProvider::new().with_response(package_json());
        let handler = handler_with(&mock);

        handler.handle(command()).await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls[0].temperature, Some(PRODUCE_TEMPERATURE));
        assert_eq!(calls[0].max_output_tokens, Some(PRODUCE_MAX_OUTPUT_TOKENS));
        assert_eq!(calls[0].timeout, Some(Duration::from_secs(40)));
        assert_eq!(calls[0].max_retries, 1);
        assert!(calls[0]
            .system_instruction
            .as_deref()
            .is_some_and(|s| s.contains("ONLY return valid JSON")));
    }

    #[tokio::test]
    async fn prompt_embeds_answers_when_present() {
        let mock = MockGenerationProvider::new().with_response(package_json());
        let handler = handler_with(&mock);

        let mut answers = BTreeMap::new();
        answers.insert("q1".to_string(), "Only B2B customers".to_string());

        handler
            .handle(ProduceCommand {
                answers: Some(answers),
                ..command()
            })
            .await
            .unwrap();

        let prompt = &mock.calls()[0].prompt;
        assert!(prompt.contains("Clarifying Question Answers:"));
        assert!(prompt.contains("- q1: Only B2B customers"));
    }

    #[tokio::test]
    async fn unparseable_reply_surfaces_parse_kind() {
        let mock = MockGenerationProvider::new().with_response("Sorry, I cannot help with that.");
        let handler = handler_with(&mock);

        let err = handler.handle(command()).await.unwrap_err();
        assert!(matches!(err, DecisionError::Parse(_)));
    }

    #[tokio::test]
    async fn structurally_invalid_package_surfaces_schema_kind() {
        // Valid JSON, but scenarios.worst is missing.
        let mut value: serde_json::Value = serde_json::from_str(&package_json()).unwrap();
        value["scenarios"].as_object_mut().unwrap().remove("worst");

        let mock = MockGenerationProvider::new().with_response(value.to_string());
        let handler = handler_with(&mock);

        let err = handler.handle(command()).await.unwrap_err();
        assert!(matches!(err, DecisionError::Schema));
    }

    #[tokio::test]
    async fn out_of_range_probability_passes_through() {
        let mut value: serde_json::Value = serde_json::from_str(&package_json()).unwrap();
        value["options"][0]["success_probability"] = json!(150);

        let mock = MockGenerationProvider::new().with_response(value.to_string());
        let handler = handler_with(&mock);

        let package = handler.handle(command()).await.unwrap();
        assert_eq!(package.options[0].success_probability, 150.0);
    }

    #[tokio::test]
    async fn quota_error_passes_through_as_quota_kind() {
        let mock = MockGenerationProvider::new().with_outcome(MockOutcome::Quota {
            message: "You exceeded your current quota".to_string(),
        });
        let handler = handler_with(&mock);

        let err = handler.handle(command()).await.unwrap_err();
        assert!(err.is_quota());
    }
}
