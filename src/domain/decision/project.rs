//! Saved project records and their export/import serialization.
//!
//! A project bundles a problem, its constraints and answers, and optionally
//! a produced decision package. Projects exist once saved and persist until
//! explicitly deleted; the in-flight working set of the UI is not a project.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::foundation::{ProjectId, Timestamp};

use super::Constraints;

/// A persisted decision session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    #[serde(default)]
    pub title: String,
    pub problem: String,
    #[serde(default)]
    pub constraints: Constraints,
    /// Clarifying answers keyed by question id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<BTreeMap<String, String>>,
    /// Produced decision package, carried as raw JSON so imported records
    /// with malformed bodies propagate as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
    #[serde(rename = "updatedAt")]
    pub updated_at: Timestamp,
}

impl Project {
    /// Creates a fresh project with a generated id and current timestamps.
    pub fn new(title: impl Into<String>, problem: impl Into<String>, constraints: Constraints) -> Self {
        let now = Timestamp::now();
        Self {
            id: ProjectId::generate(),
            title: title.into(),
            problem: problem.into(),
            constraints,
            answers: None,
            result: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builds a project from one imported record, assigning a fresh id and
    /// fresh timestamps. The record's own id and timestamps are discarded.
    pub fn from_import(value: Value) -> Result<Self, ImportError> {
        let body: ImportedProjectBody =
            serde_json::from_value(value).map_err(|_| ImportError::Format)?;
        let now = Timestamp::now();
        Ok(Self {
            id: ProjectId::generate(),
            title: body.title,
            problem: body.problem,
            constraints: body.constraints,
            answers: body.answers,
            result: body.result,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Import payload did not match any accepted shape.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid project data format")]
    Format,
}

/// Inner fields of an imported record. Only `problem` is required; other
/// bodies pass through without schema validation.
#[derive(Debug, Deserialize)]
struct ImportedProjectBody {
    #[serde(default)]
    title: String,
    problem: String,
    #[serde(default)]
    constraints: Constraints,
    #[serde(default)]
    answers: Option<BTreeMap<String, String>>,
    #[serde(default)]
    result: Option<Value>,
}

/// Export envelope for a full-store dump.
#[derive(Debug, Serialize)]
struct ExportEnvelope<'a> {
    exported: Timestamp,
    projects: &'a [Project],
}

/// Canonical pretty-printed serialization of exactly one project.
pub fn export_project(project: &Project) -> String {
    serde_json::to_string_pretty(project).unwrap_or_default()
}

/// Pretty-printed `{ exported, projects }` envelope for many projects.
pub fn export_all_projects(projects: &[Project]) -> String {
    let envelope = ExportEnvelope {
        exported: Timestamp::now(),
        projects,
    };
    serde_json::to_string_pretty(&envelope).unwrap_or_default()
}

/// Detects the shape of an export payload and returns its project-like
/// records. Accepted shapes: an object with a `projects` list, a bare list,
/// or a single object carrying `id` and `problem`.
///
/// Does not deduplicate, persist, or validate record bodies; callers assign
/// fresh ids and timestamps before saving.
pub fn import_projects(text: &str) -> Result<Vec<Value>, ImportError> {
    let data: Value = serde_json::from_str(text).map_err(|_| ImportError::Format)?;

    if let Some(projects) = data.get("projects").and_then(Value::as_array) {
        return Ok(projects.clone());
    }
    if let Value::Array(items) = data {
        return Ok(items);
    }
    if data.get("id").is_some() && data.get("problem").is_some() {
        return Ok(vec![data]);
    }
    Err(ImportError::Format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_project() -> Project {
        Project::new(
            "Europe expansion",
            "Should we expand into the European market this year?",
            Constraints {
                budget: Some("$500,000".to_string()),
                timeframe: Some("6 months".to_string()),
                ..Default::default()
            },
        )
    }

    #[test]
    fn new_project_stamps_matching_timestamps() {
        let project = sample_project();
        assert_eq!(project.created_at, project.updated_at);
        assert!(project.id.as_str().starts_with("proj_"));
    }

    #[test]
    fn export_is_pretty_printed_json() {
        let text = export_project(&sample_project());
        assert!(text.contains("\n"));
        assert!(text.contains("\"createdAt\""));

        let back: Project = serde_json::from_str(&text).unwrap();
        assert_eq!(back.problem, sample_project().problem);
    }

    #[test]
    fn export_all_wraps_in_envelope() {
        let projects = vec![sample_project()];
        let text = export_all_projects(&projects);
        let value: Value = serde_json::from_str(&text).unwrap();

        assert!(value.get("exported").is_some());
        assert_eq!(value["projects"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn import_accepts_envelope_shape() {
        let items = import_projects(r#"{"projects":[{"id":"a","problem":"x"}]}"#).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["id"], json!("a"));
    }

    #[test]
    fn import_accepts_bare_list() {
        let items = import_projects(r#"[{"id":"a","problem":"x"},{"id":"b","problem":"y"}]"#)
            .unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn import_accepts_single_project_object() {
        let items = import_projects(r#"{"id":"a","problem":"x","title":"t"}"#).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn import_rejects_non_json() {
        assert!(matches!(
            import_projects("not json"),
            Err(ImportError::Format)
        ));
    }

    #[test]
    fn import_rejects_unrecognized_shape() {
        assert!(matches!(
            import_projects(r#"{"foo":"bar"}"#),
            Err(ImportError::Format)
        ));
    }

    #[test]
    fn from_import_assigns_fresh_identity() {
        let value = json!({
            "id": "a",
            "problem": "x",
            "createdAt": "2020-01-01T00:00:00Z",
            "updatedAt": "2020-01-01T00:00:00Z"
        });
        let project = Project::from_import(value).unwrap();

        assert_ne!(project.id.as_str(), "a");
        assert!(project.created_at.as_datetime().timestamp() > 1_500_000_000);
    }

    #[test]
    fn from_import_carries_malformed_result_as_is() {
        let value = json!({
            "id": "a",
            "problem": "x",
            "result": {"title": 42, "options": "not a list"}
        });
        let project = Project::from_import(value).unwrap();
        assert_eq!(project.result.unwrap()["title"], json!(42));
    }

    #[test]
    fn from_import_requires_problem() {
        let value = json!({"id": "a"});
        assert!(Project::from_import(value).is_err());
    }

    #[test]
    fn project_roundtrips_with_camel_case_timestamps() {
        let project = sample_project();
        let value = serde_json::to_value(&project).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("answers").is_none());
    }
}
