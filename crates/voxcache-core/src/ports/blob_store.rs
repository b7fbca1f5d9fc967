//! Blob store port — key→bytes storage for cached audio artifacts.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use thiserror::Error;

use super::ByteStream;

/// Errors raised by blob store operations.
///
/// `NotFound` is separated from generic I/O failure because the proxy
/// treats the two very differently: an entry that vanished between the
/// existence check and the read (a concurrent prune) falls back to fresh
/// synthesis, while any other read failure is surfaced as an internal
/// inconsistency.
#[derive(Debug, Error)]
pub enum BlobStoreError {
    /// No blob exists at the given path.
    #[error("blob not found: {0}")]
    NotFound(String),

    /// The underlying storage failed.
    #[error("storage error on {path}: {message}")]
    Io { path: String, message: String },
}

impl BlobStoreError {
    /// Build an `Io` error from any displayable cause.
    pub fn io(path: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.into(),
            message: cause.to_string(),
        }
    }
}

/// Port trait for the cache storage backend.
///
/// Paths are relative, slash-separated (e.g. `tts/<key>.mp3`). Entries
/// are immutable once written: they are created by a successful
/// synthesis, replayed byte-exact on hits, and removed only by the
/// pruner or an explicit purge. `write` must be atomic — a concurrent
/// reader sees either the previous state or the complete new blob,
/// never a partial one.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Whether a blob exists at `path`.
    async fn exists(&self, path: &str) -> Result<bool, BlobStoreError>;

    /// Open a streamed read of the blob at `path`.
    async fn open_read(&self, path: &str) -> Result<ByteStream, BlobStoreError>;

    /// Size of the blob at `path`, in bytes.
    async fn size(&self, path: &str) -> Result<u64, BlobStoreError>;

    /// Atomically write `bytes` to `path`, replacing any existing blob.
    async fn write(&self, path: &str, bytes: Bytes) -> Result<(), BlobStoreError>;

    /// List all blob paths under the given prefix. A prefix with no
    /// entries yields an empty list, not an error.
    async fn list_with_prefix(&self, prefix: &str) -> Result<Vec<String>, BlobStoreError>;

    /// Last-modified timestamp of the blob at `path`.
    async fn last_modified(&self, path: &str) -> Result<DateTime<Utc>, BlobStoreError>;

    /// Delete the blob at `path`.
    async fn delete(&self, path: &str) -> Result<(), BlobStoreError>;
}
