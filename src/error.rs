//! Error types for the cache layer
//!
//! Provides unified error handling using thiserror.
//!
//! Key-not-found is deliberately not an error: `get` returns an `Option` and
//! removal is idempotent. The variants here cover the upstream fetch path and
//! the admin surface; nothing in this crate is fatal to the host process.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache layer.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Upstream request could not be sent or completed
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Upstream responded with a non-success status
    #[error("Upstream returned status {0} for {1}")]
    UpstreamStatus(u16, String),

    /// Upstream returned success but no payload where one is required
    #[error("Upstream returned an empty response for {0}")]
    EmptyUpstream(String),

    /// Upstream payload could not be decoded
    #[error("Failed to decode payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::Upstream(_) | CacheError::UpstreamStatus(..) => StatusCode::BAD_GATEWAY,
            CacheError::EmptyUpstream(_) | CacheError::Decode(_) => StatusCode::BAD_GATEWAY,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache layer.
pub type Result<T> = std::result::Result<T, CacheError>;
