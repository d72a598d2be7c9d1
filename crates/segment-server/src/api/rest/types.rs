//! REST API type definitions
//!
//! Request and response types for the REST API endpoints.

use crate::error::ServerError;
use segment_sdk::{SegmentEngine, SegmentRequest, SegmentResults, SegmentRules, Value};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SegmentEngine>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Evaluation response
#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub results: SegmentResults,
}

/// Split a request body into user attributes and segment rules.
///
/// Presence of `user` and `segments` is checked before their shapes so the
/// client gets the "Missing ..." message first.
pub(super) fn parse_evaluate_body(body: serde_json::Value) -> Result<SegmentRequest, ServerError> {
    let mut object = match body {
        serde_json::Value::Object(object) => object,
        _ => {
            return Err(ServerError::InvalidRequest(
                "Request body must be a JSON object".to_string(),
            ))
        }
    };

    let user = object
        .remove("user")
        .ok_or_else(|| ServerError::InvalidRequest("Missing 'user' field".to_string()))?;
    let segments = object
        .remove("segments")
        .ok_or_else(|| ServerError::InvalidRequest("Missing 'segments' field".to_string()))?;

    let user: HashMap<String, Value> = serde_json::from_value(user)
        .map_err(|e| ServerError::InvalidRequest(format!("Invalid 'user' field: {}", e)))?;
    let segments: SegmentRules = serde_json::from_value(segments)
        .map_err(|e| ServerError::InvalidRequest(format!("Invalid 'segments' field: {}", e)))?;

    Ok(SegmentRequest::new(user, segments))
}
