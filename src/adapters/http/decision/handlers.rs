//! HTTP handlers for the decision endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::{
    ClarifyCommand, ClarifyHandler, DiagnosticPingHandler, ProduceCommand, ProduceHandler,
};
use crate::application::DecisionError;
use crate::config::ConfigurationStatus;

use super::dto::{
    ClarifyRequest, ClarifyResponse, ErrorResponse, PingResponse, ProduceRequest, ProduceResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct DecisionHandlers {
    status: ConfigurationStatus,
    clarify_handler: Arc<ClarifyHandler>,
    produce_handler: Arc<ProduceHandler>,
    ping_handler: Arc<DiagnosticPingHandler>,
}

impl DecisionHandlers {
    pub fn new(
        status: ConfigurationStatus,
        clarify_handler: Arc<ClarifyHandler>,
        produce_handler: Arc<ProduceHandler>,
        ping_handler: Arc<DiagnosticPingHandler>,
    ) -> Self {
        Self {
            status,
            clarify_handler,
            produce_handler,
            ping_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /configuration-status - Report whether a generation credential is set
pub async fn configuration_status(State(handlers): State<DecisionHandlers>) -> Response {
    (StatusCode::OK, Json(handlers.status.clone())).into_response()
}

/// POST /clarify - Generate clarifying questions
pub async fn clarify(
    State(handlers): State<DecisionHandlers>,
    Json(req): Json<ClarifyRequest>,
) -> Response {
    let cmd = ClarifyCommand {
        problem: req.problem,
        constraints: req.constraints,
    };

    match handlers.clarify_handler.handle(cmd).await {
        Ok(questions) => (StatusCode::OK, Json(ClarifyResponse { questions })).into_response(),
        Err(e) => handle_decision_error(e),
    }
}

/// POST /produce - Generate a full decision package
pub async fn produce(
    State(handlers): State<DecisionHandlers>,
    Json(req): Json<ProduceRequest>,
) -> Response {
    let cmd = ProduceCommand {
        problem: req.problem,
        constraints: req.constraints,
        answers: req.answers,
    };

    match handlers.produce_handler.handle(cmd).await {
        Ok(result) => (
            StatusCode::OK,
            Json(ProduceResponse {
                success: true,
                result,
            }),
        )
            .into_response(),
        Err(e) => handle_decision_error(e),
    }
}

/// POST /diagnostic-ping - One timed round trip against the generation API
pub async fn diagnostic_ping(State(handlers): State<DecisionHandlers>) -> Response {
    match handlers.ping_handler.handle().await {
        Ok(latency_ms) => (
            StatusCode::OK,
            Json(PingResponse {
                success: true,
                latency_ms,
            }),
        )
            .into_response(),
        Err(e) => handle_decision_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_decision_error(error: DecisionError) -> Response {
    let status = match &error {
        DecisionError::Configuration | DecisionError::Validation(_) => StatusCode::BAD_REQUEST,
        DecisionError::Quota { .. } => StatusCode::TOO_MANY_REQUESTS,
        DecisionError::Upstream { .. }
        | DecisionError::EmptyResponse
        | DecisionError::Parse(_)
        | DecisionError::Schema => StatusCode::BAD_GATEWAY,
        DecisionError::Timeout { .. } | DecisionError::Network(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let body = if error.is_quota() {
        ErrorResponse::quota(error.to_string())
    } else {
        ErrorResponse::new(error.to_string())
    };

    (status, Json(body)).into_response()
}
