//! Local-disk blob store.

use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures_util::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::debug;

use voxcache_core::{BlobStore, BlobStoreError, ByteStream};

/// Monotonic suffix for temp file names within this process.
static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Blob store rooted at a directory on the local filesystem.
///
/// Blob paths are relative and slash-separated; path segments must not
/// escape the root. Writes go through a temp file in the destination
/// directory followed by a rename, so readers never observe a partial
/// blob.
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, BlobStoreError> {
        if path.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..") {
            return Err(BlobStoreError::io(path, "invalid blob path"));
        }
        Ok(self.root.join(path))
    }

    fn map_io(path: &str, e: std::io::Error) -> BlobStoreError {
        if e.kind() == std::io::ErrorKind::NotFound {
            BlobStoreError::NotFound(path.to_owned())
        } else {
            BlobStoreError::io(path, e)
        }
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn exists(&self, path: &str) -> Result<bool, BlobStoreError> {
        let full = self.resolve(path)?;
        fs::try_exists(&full)
            .await
            .map_err(|e| BlobStoreError::io(path, e))
    }

    async fn open_read(&self, path: &str) -> Result<ByteStream, BlobStoreError> {
        let full = self.resolve(path)?;
        let file = fs::File::open(&full)
            .await
            .map_err(|e| Self::map_io(path, e))?;
        Ok(ReaderStream::new(file).boxed())
    }

    async fn size(&self, path: &str) -> Result<u64, BlobStoreError> {
        let full = self.resolve(path)?;
        let meta = fs::metadata(&full)
            .await
            .map_err(|e| Self::map_io(path, e))?;
        Ok(meta.len())
    }

    async fn write(&self, path: &str, bytes: Bytes) -> Result<(), BlobStoreError> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| BlobStoreError::io(path, e))?;
        }

        // Write-then-rename within the same directory keeps the swap
        // atomic on every platform we care about.
        let tmp = full.with_extension(format!(
            "tmp.{}.{}",
            process::id(),
            TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        let mut file = fs::File::create(&tmp)
            .await
            .map_err(|e| BlobStoreError::io(path, e))?;
        if let Err(e) = async {
            file.write_all(&bytes).await?;
            file.flush().await
        }
        .await
        {
            let _ = fs::remove_file(&tmp).await;
            return Err(BlobStoreError::io(path, e));
        }
        drop(file);

        if let Err(e) = fs::rename(&tmp, &full).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(BlobStoreError::io(path, e));
        }
        debug!(path, bytes = bytes.len(), "blob written");
        Ok(())
    }

    async fn list_with_prefix(&self, prefix: &str) -> Result<Vec<String>, BlobStoreError> {
        let dir_prefix = prefix.trim_end_matches('/');
        let dir = if dir_prefix.is_empty() {
            self.root.clone()
        } else {
            self.resolve(dir_prefix)?
        };

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(BlobStoreError::io(prefix, e)),
        };

        let mut paths = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| BlobStoreError::io(prefix, e))?
        {
            let is_file = entry
                .file_type()
                .await
                .map_err(|e| BlobStoreError::io(prefix, e))?
                .is_file();
            if !is_file {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if dir_prefix.is_empty() {
                paths.push(name);
            } else {
                paths.push(format!("{dir_prefix}/{name}"));
            }
        }
        paths.sort();
        Ok(paths)
    }

    async fn last_modified(&self, path: &str) -> Result<DateTime<Utc>, BlobStoreError> {
        let full = self.resolve(path)?;
        let meta = fs::metadata(&full)
            .await
            .map_err(|e| Self::map_io(path, e))?;
        let modified = meta.modified().map_err(|e| BlobStoreError::io(path, e))?;
        Ok(DateTime::<Utc>::from(modified))
    }

    async fn delete(&self, path: &str) -> Result<(), BlobStoreError> {
        let full = self.resolve(path)?;
        fs::remove_file(&full)
            .await
            .map_err(|e| Self::map_io(path, e))
    }
}
