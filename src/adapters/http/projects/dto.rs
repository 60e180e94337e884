//! HTTP DTOs for the project store endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::decision::{Constraints, Project};
use crate::domain::foundation::Timestamp;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Upsert request for one project. Omitted id/createdAt are assigned
/// server-side; updatedAt is always stamped by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveProjectRequest {
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    pub problem: String,
    #[serde(default)]
    pub constraints: Constraints,
    #[serde(default)]
    pub answers: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<Timestamp>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response listing stored projects, most recently updated first.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_request_accepts_minimal_body() {
        let json = r#"{"problem": "Should we expand into Europe this year?"}"#;
        let req: SaveProjectRequest = serde_json::from_str(json).unwrap();
        assert!(req.id.is_none());
        assert!(req.created_at.is_none());
        assert_eq!(req.title, "");
    }

    #[test]
    fn save_request_accepts_full_body() {
        let json = r#"{
            "id": "proj_1",
            "title": "Expansion",
            "problem": "Should we expand into Europe this year?",
            "constraints": {"budget": "$500,000"},
            "answers": {"q1": "Yes"},
            "result": {"title": "anything goes here"},
            "createdAt": "2024-01-15T10:30:00Z"
        }"#;
        let req: SaveProjectRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.id.as_deref(), Some("proj_1"));
        assert!(req.created_at.is_some());
        assert!(req.result.is_some());
    }
}
