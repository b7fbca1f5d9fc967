//! Axum-specific error types and mappings.
//!
//! Maps domain errors to HTTP status codes. Bodies are plain text so
//! that clients expecting an audio stream get a readable diagnostic
//! instead of a JSON envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use voxcache_core::ProxyError;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Bad request (invalid input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Service unavailable (synthesis backend down).
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, message).into_response()
    }
}

impl From<ProxyError> for HttpError {
    fn from(err: ProxyError) -> Self {
        match err {
            ProxyError::Validation(msg) => Self::BadRequest(msg),
            ProxyError::SsmlSyntax(msg) => Self::BadRequest(format!("Invalid SSML: {msg}")),
            ProxyError::CacheRead(msg) => Self::Internal(format!("Cache: {msg}")),
            ProxyError::Synthesis(msg) => Self::ServiceUnavailable(msg),
        }
    }
}
