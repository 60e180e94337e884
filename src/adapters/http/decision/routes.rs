//! HTTP routes for the decision endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    clarify, configuration_status, diagnostic_ping, produce, DecisionHandlers,
};

/// Creates the decision router with all endpoints.
pub fn decision_routes(handlers: DecisionHandlers) -> Router {
    Router::new()
        .route("/configuration-status", get(configuration_status))
        .route("/clarify", post(clarify))
        .route("/produce", post(produce))
        .route("/diagnostic-ping", post(diagnostic_ping))
        .with_state(handlers)
}
