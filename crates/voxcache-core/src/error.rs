//! Request-level error taxonomy for the streaming cache proxy.

use thiserror::Error;

/// Errors surfaced to the caller of [`crate::StreamingCacheProxy::handle`].
///
/// Each variant maps to a distinct HTTP status in the web adapter:
/// validation and SSML failures are the caller's fault (400), a cache
/// entry that exists but cannot be read is an internal inconsistency
/// (500), and a backend failure before any audio was produced is a
/// temporary upstream condition (503). Cache *write* failures after a
/// successful stream are deliberately absent here — they are logged and
/// never surfaced, since the caller already received their audio.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// A request field is missing, oversized or malformed.
    #[error("{0}")]
    Validation(String),

    /// The payload announced itself as SSML but is not well-formed.
    #[error("SSML syntax error: {0}")]
    SsmlSyntax(String),

    /// A cache entry exists but could not be read back.
    #[error("cache read error: {0}")]
    CacheRead(String),

    /// The synthesis backend failed before producing a stream.
    #[error("speech synthesis error: {0}")]
    Synthesis(String),
}
