//! HTTP routes for the project store endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    delete_project, export_all, export_one, import, list_projects, save_project, ProjectHandlers,
};

/// Creates the projects router with all endpoints.
pub fn project_routes(handlers: ProjectHandlers) -> Router {
    Router::new()
        .route("/projects", get(list_projects))
        .route("/projects", post(save_project))
        .route("/projects/export", get(export_all))
        .route("/projects/import", post(import))
        .route("/projects/:id", delete(delete_project))
        .route("/projects/:id/export", get(export_one))
        .with_state(handlers)
}
