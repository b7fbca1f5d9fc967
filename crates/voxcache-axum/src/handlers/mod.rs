//! HTTP handlers, one module per endpoint group.

pub mod stream;
pub mod voices;

/// `GET /health`
pub async fn health() -> &'static str {
    "OK"
}
