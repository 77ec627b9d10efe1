//! Error types for the OTT cache service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Boxed cause carried by [`SourceReadError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// == Source Read Error ==
/// A backing resource could not be stat'ed, read or parsed.
///
/// This is the only error the read-through source cache produces.
#[derive(Error, Debug)]
#[error("Failed to read data from {source_id}: {cause}")]
pub struct SourceReadError {
    /// Identifier of the resource (file name, store key)
    pub source_id: String,
    /// Underlying failure
    #[source]
    pub cause: BoxError,
}

impl SourceReadError {
    pub fn new(source_id: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        Self {
            source_id: source_id.into(),
            cause: cause.into(),
        }
    }
}

// == Api Error Enum ==
/// Unified error type for the HTTP surface.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Requested data does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Backing data could not be loaded
    #[error(transparent)]
    Source(#[from] SourceReadError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Source(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for HTTP handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
