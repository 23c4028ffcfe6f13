//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache and its service surface.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Cache constructed with a capacity below one
    #[error("Invalid capacity: {0} (a cache must hold at least one entry)")]
    InvalidCapacity(usize),

    /// Key not present or no longer live
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Memoization key could not be encoded
    #[error("Failed to encode cache key: {0}")]
    KeyEncoding(#[from] serde_json::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::InvalidCapacity(_) | CacheError::KeyEncoding(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (CacheError::NotFound("k".into()), StatusCode::NOT_FOUND),
            (CacheError::InvalidRequest("bad".into()), StatusCode::BAD_REQUEST),
            (CacheError::InvalidCapacity(0), StatusCode::INTERNAL_SERVER_ERROR),
            (
                crate::memo::cache_key("lookup", &std::collections::HashMap::from([((1, 2), 3)]))
                    .unwrap_err(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_invalid_capacity_message() {
        let message = CacheError::InvalidCapacity(0).to_string();
        assert!(message.contains("Invalid capacity: 0"));
    }
}
