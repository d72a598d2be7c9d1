//! Router creation and configuration
//!
//! Creates Axum routers for REST API endpoints.

use super::handlers::*;
use super::types::AppState;
use axum::{
    routing::{get, get_service},
    Router,
};
use segment_sdk::SegmentEngine;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

/// Create REST API router
///
/// `GET /evaluate` serves `test_page`; a missing file yields 404.
pub fn create_router(engine: Arc<SegmentEngine>, test_page: impl AsRef<Path>) -> Router {
    let state = AppState { engine };

    Router::new()
        .route("/health", get(health))
        .route(
            "/evaluate",
            get_service(ServeFile::new(test_page.as_ref())).post(evaluate),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
