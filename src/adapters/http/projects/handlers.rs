//! HTTP handlers for the project store endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::domain::decision::{
    export_all_projects, export_project, import_projects, ImportError, Project,
};
use crate::domain::foundation::{ProjectId, Timestamp};
use crate::ports::{ProjectRepository, ProjectStoreError};

use super::dto::{ErrorResponse, ProjectsResponse, SaveProjectRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ProjectHandlers {
    store: Arc<dyn ProjectRepository>,
}

impl ProjectHandlers {
    pub fn new(store: Arc<dyn ProjectRepository>) -> Self {
        Self { store }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /projects - List stored projects, most recently updated first
pub async fn list_projects(State(handlers): State<ProjectHandlers>) -> Response {
    match handlers.store.list_all().await {
        Ok(projects) => (StatusCode::OK, Json(ProjectsResponse { projects })).into_response(),
        Err(e) => handle_store_error(e),
    }
}

/// POST /projects - Upsert one project
pub async fn save_project(
    State(handlers): State<ProjectHandlers>,
    Json(req): Json<SaveProjectRequest>,
) -> Response {
    let id = req
        .id
        .map(ProjectId::from)
        .unwrap_or_else(ProjectId::generate);

    // Preserve createdAt across re-saves: the client's value wins, then the
    // stored record's, then now.
    let created_at = match req.created_at {
        Some(ts) => ts,
        None => match handlers.store.get(&id).await {
            Ok(Some(existing)) => existing.created_at,
            Ok(None) => Timestamp::now(),
            Err(e) => return handle_store_error(e),
        },
    };

    let project = Project {
        id,
        title: req.title,
        problem: req.problem,
        constraints: req.constraints,
        answers: req.answers,
        result: req.result,
        created_at,
        updated_at: Timestamp::now(),
    };

    match handlers.store.save(&project).await {
        Ok(stored) => (StatusCode::OK, Json(stored)).into_response(),
        Err(e) => handle_store_error(e),
    }
}

/// DELETE /projects/:id - Idempotent delete
pub async fn delete_project(
    State(handlers): State<ProjectHandlers>,
    Path(id): Path<String>,
) -> Response {
    match handlers.store.delete(&ProjectId::from(id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_store_error(e),
    }
}

/// GET /projects/export - Pretty JSON envelope of every stored project
pub async fn export_all(State(handlers): State<ProjectHandlers>) -> Response {
    match handlers.store.list_all().await {
        Ok(projects) => json_document(export_all_projects(&projects)),
        Err(e) => handle_store_error(e),
    }
}

/// GET /projects/:id/export - Pretty JSON of exactly one project
pub async fn export_one(
    State(handlers): State<ProjectHandlers>,
    Path(id): Path<String>,
) -> Response {
    let id = ProjectId::from(id);
    match handlers.store.get(&id).await {
        Ok(Some(project)) => json_document(export_project(&project)),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(format!("Project not found: {}", id))),
        )
            .into_response(),
        Err(e) => handle_store_error(e),
    }
}

/// POST /projects/import - Import an export payload
///
/// Accepts the raw export text, assigns fresh ids and timestamps to every
/// detected record, persists them, and returns the saved projects. No
/// deduplication: importing the same file twice duplicates its projects.
pub async fn import(State(handlers): State<ProjectHandlers>, body: String) -> Response {
    let records = match import_projects(&body) {
        Ok(records) => records,
        Err(ImportError::Format) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Invalid project data format")),
            )
                .into_response()
        }
    };

    let mut saved = Vec::with_capacity(records.len());
    for record in records {
        let project = match Project::from_import(record) {
            Ok(project) => project,
            Err(ImportError::Format) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new("Invalid project data format")),
                )
                    .into_response()
            }
        };
        match handlers.store.save(&project).await {
            Ok(stored) => saved.push(stored),
            Err(e) => return handle_store_error(e),
        }
    }

    (StatusCode::OK, Json(ProjectsResponse { projects: saved })).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

/// Serves an already-serialized pretty JSON document.
fn json_document(text: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        text,
    )
        .into_response()
}

fn handle_store_error(error: ProjectStoreError) -> Response {
    error!(error = %error, "project store operation failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Project store error")),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_maps_to_500() {
        let response = handle_store_error(ProjectStoreError::IoError("disk".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn json_document_sets_content_type() {
        let response = json_document("{}".to_string());
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
