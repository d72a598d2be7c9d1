//! API endpoint handlers
//!
//! HTTP request handlers for all REST API endpoints.

use super::extractors::JsonExtractor;
use super::types::*;
use crate::error::ServerError;
use axum::{extract::State, Json};
use tracing::{debug, info};

/// Health check endpoint
pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Segment evaluation endpoint
#[axum::debug_handler]
pub(super) async fn evaluate(
    State(state): State<AppState>,
    JsonExtractor(body): JsonExtractor<serde_json::Value>,
) -> Result<Json<EvaluateResponse>, ServerError> {
    let request = parse_evaluate_body(body)?;

    info!(
        "Received evaluation request with {} user fields, {} segments",
        request.user.len(),
        request.segments.len()
    );

    let results = state.engine.evaluate_request(&request).map_err(|e| {
        debug!("evaluation failed: {}", e);
        ServerError::from(e)
    })?;

    Ok(Json(EvaluateResponse { results }))
}
