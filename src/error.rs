//! Error types for the variant cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache and the services built on it.
///
/// A cache miss is not an error; `get` reports it as `None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CacheError {
    /// Malformed input rejected before touching the cache
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Key not found, surfaced only at the HTTP boundary
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Variant generation failed on every path
    #[error("Generation failed: {0}")]
    Generation(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::Generation(_) => StatusCode::BAD_GATEWAY,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, CacheError>;
