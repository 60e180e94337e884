//! HTTP adapter: route groups and the assembled application router.

pub mod decision;
pub mod projects;

use std::time::Duration;

use axum::Router;
use http::HeaderValue;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::ServerConfig;

pub use decision::{decision_routes, DecisionHandlers};
pub use projects::{project_routes, ProjectHandlers};

/// Assembles the full application router with tracing, timeout and CORS
/// layers applied.
pub fn app_router(
    decision_handlers: DecisionHandlers,
    project_handlers: ProjectHandlers,
    server: &ServerConfig,
) -> Router {
    Router::new()
        .merge(decision_routes(decision_handlers))
        .merge(project_routes(project_handlers))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    server.request_timeout_secs,
                )))
                .layer(cors_layer(server)),
        )
}

/// Configured origins, or permissive CORS when none are set (development).
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins = server.cors_origins_list();
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}
