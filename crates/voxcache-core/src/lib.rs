//! Core domain types, port definitions and services for voxcache.
//!
//! This crate is adapter-free: no HTTP, no filesystem, no CLI. Concrete
//! blob stores and synthesis backends live in their own crates and plug
//! in through the traits defined under [`ports`].

pub mod domain;
pub mod error;
pub mod fingerprint;
pub mod ports;
pub mod services;
pub mod settings;
pub mod ssml;

// Re-export commonly used types for convenience
pub use domain::{MAX_TEXT_CHARS, ProsodyOptions, SynthesisRequest, VoiceDescriptor};
pub use error::ProxyError;
pub use fingerprint::CacheKey;
pub use ports::{BlobStore, BlobStoreError, ByteStream, SpeechSynthesizer, SynthesisError};
pub use services::{
    AudioReply, CachePruner, PruneReport, ProxyConfig, StreamingCacheProxy, VoiceCatalog,
};
pub use settings::{DEFAULT_RETENTION_DAYS, DEFAULT_SERVER_PORT, DEFAULT_VOICE, TtsSettings};
pub use ssml::is_valid_ssml;
