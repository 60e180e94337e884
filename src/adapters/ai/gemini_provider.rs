//! Gemini Provider - Implementation of GenerationProvider for Google's
//! Gemini generateContent API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-2.5-flash")
//!     .with_base_url("https://generativelanguage.googleapis.com");
//!
//! let provider = GeminiProvider::new(config);
//! ```
//!
//! The credential travels as a `key` query parameter, which is how this API
//! authenticates. Each call is a single attempt run under the request's
//! cooperative timeout; hitting it drops the in-flight request. HTTP 429 is
//! mapped to the distinguished quota kind. The retry budget carried by the
//! request is honored by [`RetryingGenerationProvider`], which wraps this
//! transport adapter in the wiring.
//!
//! [`RetryingGenerationProvider`]: super::RetryingGenerationProvider

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::ports::{GenerationError, GenerationProvider, GenerationRequest};

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-2.5-flash").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider with the given configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the generateContent endpoint URL.
    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Converts our request to the Gemini wire format.
    fn to_gemini_request(request: &GenerationRequest) -> GeminiRequest {
        let generation_config = if request.temperature.is_some() || request.max_output_tokens.is_some()
        {
            Some(GeminiGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
            })
        } else {
            None
        };

        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: request.prompt.clone(),
                }],
            }],
            system_instruction: request.system_instruction.as_ref().map(|text| GeminiContent {
                parts: vec![GeminiPart { text: text.clone() }],
            }),
            generation_config,
        }
    }

    /// Runs one attempt: send, classify the status, extract the text.
    async fn send_attempt(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let gemini_request = Self::to_gemini_request(request);

        let response = self
            .client
            .post(self.generate_url())
            .query(&[("key", self.config.api_key())])
            .header("Content-Type", "application/json")
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    GenerationError::network(format!("Connection failed: {}", e))
                } else {
                    GenerationError::network(e.to_string())
                }
            })?;

        self.handle_response(response).await
    }

    /// Parses the API response, mapping non-success statuses to error kinds.
    async fn handle_response(&self, response: Response) -> Result<String, GenerationError> {
        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(GenerationError::quota(parse_quota_message(&error_body)));
            }
            return Err(GenerationError::upstream(status.as_u16(), error_body));
        }

        let envelope: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::network(format!("Failed to read response: {}", e)))?;

        extract_candidate_text(envelope)
    }
}

#[async_trait]
impl GenerationProvider for GeminiProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        match request.timeout {
            Some(limit) => match tokio::time::timeout(limit, self.send_attempt(&request)).await {
                Ok(result) => result,
                Err(_) => Err(GenerationError::Timeout {
                    timeout_secs: limit.as_secs(),
                }),
            },
            None => self.send_attempt(&request).await,
        }
    }
}

/// Pulls the quota message out of a 429 error body, falling back to a
/// generic message when the body is not the expected shape.
fn parse_quota_message(error_body: &str) -> String {
    serde_json::from_str::<GeminiErrorEnvelope>(error_body)
        .ok()
        .and_then(|e| e.error)
        .and_then(|e| e.message)
        .unwrap_or_else(|| "API quota exceeded".to_string())
}

/// Extracts the first candidate's text from a success envelope.
fn extract_candidate_text(envelope: GeminiResponse) -> Result<String, GenerationError> {
    let text = envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(text)
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: Option<GeminiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: Option<String>,
}
