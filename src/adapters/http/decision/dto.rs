//! HTTP DTOs for the decision endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent
//! evolution.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::decision::{ClarifyingQuestion, Constraints, DecisionPackage};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request for clarifying questions.
#[derive(Debug, Clone, Deserialize)]
pub struct ClarifyRequest {
    pub problem: String,
    #[serde(default)]
    pub constraints: Constraints,
}

/// Request for a full decision package.
#[derive(Debug, Clone, Deserialize)]
pub struct ProduceRequest {
    pub problem: String,
    #[serde(default)]
    pub constraints: Constraints,
    /// Clarifying answers keyed by question id.
    #[serde(default)]
    pub answers: Option<BTreeMap<String, String>>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response carrying generated clarifying questions.
#[derive(Debug, Clone, Serialize)]
pub struct ClarifyResponse {
    pub questions: Vec<ClarifyingQuestion>,
}

/// Response carrying a validated decision package.
#[derive(Debug, Clone, Serialize)]
pub struct ProduceResponse {
    pub success: bool,
    pub result: DecisionPackage,
}

/// Response for the diagnostic ping.
#[derive(Debug, Clone, Serialize)]
pub struct PingResponse {
    pub success: bool,
    #[serde(rename = "latencyMs")]
    pub latency_ms: u64,
}

/// Standard error response. Quota failures additionally carry the
/// `isQuotaError` flag so the UI can render quota-specific guidance.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(rename = "isQuotaError", skip_serializing_if = "Option::is_none")]
    pub is_quota_error: Option<bool>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            is_quota_error: None,
        }
    }

    pub fn quota(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            is_quota_error: Some(true),
        }
    }
}
