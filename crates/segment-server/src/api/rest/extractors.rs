//! Custom extractors
//!
//! Provides a JSON extractor whose rejections use the API's error body.

use crate::error::ServerError;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

/// Custom JSON extractor with better error messages
pub struct JsonExtractor<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonExtractor<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => {
                let error_message = match rejection {
                    JsonRejection::JsonDataError(err) => {
                        format!("Invalid JSON data: {}", err.body_text())
                    }
                    JsonRejection::JsonSyntaxError(_) => "Invalid JSON".to_string(),
                    JsonRejection::MissingJsonContentType(_) => {
                        "Missing 'Content-Type: application/json' header".to_string()
                    }
                    _ => format!("Failed to parse JSON: {}", rejection),
                };
                tracing::debug!("rejected request body: {}", error_message);
                Err(ServerError::InvalidRequest(error_message))
            }
        }
    }
}
