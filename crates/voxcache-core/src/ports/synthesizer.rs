//! Synthesis backend port — trait abstraction over the speech service.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;
use thiserror::Error;

use crate::domain::VoiceDescriptor;

/// An ordered stream of audio chunks.
///
/// Chunks arrive in synthesis order with no duplication; the stream ends
/// normally after the last chunk, or yields an error item and stops if
/// the backend fails mid-flight. Errors are `io::Error` so the stream
/// can be handed to an HTTP body without re-mapping.
pub type ByteStream = BoxStream<'static, std::io::Result<Bytes>>;

/// Errors raised by a synthesis backend before any audio is produced.
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// The backend rejected the request (bad voice, quota, auth).
    #[error("synthesis backend rejected the request: {0}")]
    Rejected(String),

    /// The backend could not be reached or failed while connecting.
    #[error("synthesis backend unavailable: {0}")]
    Unavailable(String),

    /// The voice catalog could not be fetched or decoded.
    #[error("voice catalog error: {0}")]
    Catalog(String),
}

/// Port trait for the external speech-synthesis service.
///
/// Exactly two operations: produce a chunked audio stream for one input,
/// and list the available voices. Any concrete backend — a remote REST
/// service, a local library, a test double — implements this trait, which
/// keeps [`crate::StreamingCacheProxy`] decoupled from a specific vendor.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Start synthesizing `text` with `voice` and the given modulation
    /// options, returning the chunked audio stream.
    ///
    /// `options` is empty in SSML mode — the document carries its own
    /// prosody and the backend ignores external modulation.
    async fn stream(
        &self,
        text: &str,
        voice: &str,
        options: &BTreeMap<String, String>,
    ) -> Result<ByteStream, SynthesisError>;

    /// Fetch the current voice catalog.
    async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, SynthesisError>;
}
