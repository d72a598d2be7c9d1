//! Server error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use segment_sdk::SdkError;
use serde_json::json;
use std::fmt;

/// Server error type
#[derive(Debug)]
pub enum ServerError {
    /// Malformed or incomplete request body
    InvalidRequest(String),

    /// Record validation or segment evaluation failed
    EngineError(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    /// Message returned to the client
    pub fn message(&self) -> &str {
        match self {
            ServerError::InvalidRequest(msg) | ServerError::EngineError(msg) => msg,
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ServerError::EngineError(msg) => write!(f, "Engine error: {}", msg),
        }
    }
}

impl std::error::Error for ServerError {}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.message(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

impl From<SdkError> for ServerError {
    fn from(err: SdkError) -> Self {
        ServerError::EngineError(err.to_string())
    }
}
