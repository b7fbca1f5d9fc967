//! Retention-based removal of stale cache entries.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};

use crate::ports::{BlobStore, BlobStoreError};

/// Prefix under which audio artifacts are stored.
const AUDIO_PREFIX: &str = "tts/";

/// Outcome of one prune run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PruneReport {
    /// Entries removed because they were older than the cutoff.
    pub deleted: usize,
    /// Entries kept (fresh enough, or not an audio artifact).
    pub skipped: usize,
    /// Entries that could not be inspected or removed.
    pub failed: usize,
}

/// Deletes cached audio older than a retention window.
///
/// One entry failing to prune never aborts the run; only a failure to
/// list the store at all does.
pub struct CachePruner {
    store: Arc<dyn BlobStore>,
}

impl CachePruner {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Remove audio artifacts last modified strictly before
    /// `older_than_days` days ago.
    ///
    /// Files without the `.mp3` extension are left alone. An empty store
    /// is a successful run with zero deletions.
    pub async fn prune(&self, older_than_days: u32) -> Result<PruneReport, BlobStoreError> {
        let cutoff = Utc::now() - Duration::days(i64::from(older_than_days));
        let paths = self.store.list_with_prefix(AUDIO_PREFIX).await?;

        let mut report = PruneReport::default();
        for path in paths {
            if !path.ends_with(".mp3") {
                report.skipped += 1;
                continue;
            }
            let modified = match self.store.last_modified(&path).await {
                Ok(ts) => ts,
                Err(e) => {
                    warn!(path, error = %e, "could not inspect cache entry");
                    report.failed += 1;
                    continue;
                }
            };
            if modified >= cutoff {
                report.skipped += 1;
                continue;
            }
            match self.store.delete(&path).await {
                Ok(()) => report.deleted += 1,
                Err(e) => {
                    warn!(path, error = %e, "could not delete cache entry");
                    report.failed += 1;
                }
            }
        }

        info!(
            deleted = report.deleted,
            skipped = report.skipped,
            failed = report.failed,
            "cache prune finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use bytes::Bytes;
    use chrono::DateTime;

    use crate::ports::ByteStream;

    struct Entry {
        modified: DateTime<Utc>,
        undeletable: bool,
    }

    #[derive(Default)]
    struct TimedStore {
        entries: Mutex<BTreeMap<String, Entry>>,
    }

    impl TimedStore {
        fn insert(&self, path: &str, age_days: i64, undeletable: bool) {
            self.entries.lock().unwrap().insert(
                path.into(),
                Entry {
                    modified: Utc::now() - Duration::days(age_days),
                    undeletable,
                },
            );
        }

        fn contains(&self, path: &str) -> bool {
            self.entries.lock().unwrap().contains_key(path)
        }
    }

    #[async_trait]
    impl BlobStore for TimedStore {
        async fn exists(&self, path: &str) -> Result<bool, BlobStoreError> {
            Ok(self.contains(path))
        }

        async fn open_read(&self, path: &str) -> Result<ByteStream, BlobStoreError> {
            Err(BlobStoreError::NotFound(path.into()))
        }

        async fn size(&self, path: &str) -> Result<u64, BlobStoreError> {
            Err(BlobStoreError::NotFound(path.into()))
        }

        async fn write(&self, path: &str, _bytes: Bytes) -> Result<(), BlobStoreError> {
            self.insert(path, 0, false);
            Ok(())
        }

        async fn list_with_prefix(&self, prefix: &str) -> Result<Vec<String>, BlobStoreError> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .keys()
                .filter(|k| k.starts_with(prefix))
                .cloned()
                .collect())
        }

        async fn last_modified(&self, path: &str) -> Result<DateTime<Utc>, BlobStoreError> {
            self.entries
                .lock()
                .unwrap()
                .get(path)
                .map(|e| e.modified)
                .ok_or_else(|| BlobStoreError::NotFound(path.into()))
        }

        async fn delete(&self, path: &str) -> Result<(), BlobStoreError> {
            let mut entries = self.entries.lock().unwrap();
            if entries.get(path).is_some_and(|e| e.undeletable) {
                return Err(BlobStoreError::io(path, "permission denied"));
            }
            entries.remove(path);
            Ok(())
        }
    }

    #[tokio::test]
    async fn stale_entries_are_deleted_and_fresh_ones_kept() {
        let store = Arc::new(TimedStore::default());
        store.insert("tts/old.mp3", 100, false);
        store.insert("tts/fresh.mp3", 10, false);

        let report = CachePruner::new(store.clone()).prune(90).await.unwrap();

        assert_eq!(report.deleted, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed, 0);
        assert!(!store.contains("tts/old.mp3"));
        assert!(store.contains("tts/fresh.mp3"));
    }

    #[tokio::test]
    async fn non_audio_files_are_left_alone() {
        let store = Arc::new(TimedStore::default());
        store.insert("tts/notes.txt", 400, false);

        let report = CachePruner::new(store.clone()).prune(90).await.unwrap();

        assert_eq!(report.deleted, 0);
        assert_eq!(report.skipped, 1);
        assert!(store.contains("tts/notes.txt"));
    }

    #[tokio::test]
    async fn empty_store_prunes_successfully() {
        let store = Arc::new(TimedStore::default());
        let report = CachePruner::new(store).prune(90).await.unwrap();
        assert_eq!(report, PruneReport::default());
    }

    #[tokio::test]
    async fn one_bad_entry_does_not_abort_the_run() {
        let store = Arc::new(TimedStore::default());
        store.insert("tts/stuck.mp3", 200, true);
        store.insert("tts/old.mp3", 200, false);

        let report = CachePruner::new(store.clone()).prune(90).await.unwrap();

        assert_eq!(report.deleted, 1);
        assert_eq!(report.failed, 1);
        assert!(store.contains("tts/stuck.mp3"));
        assert!(!store.contains("tts/old.mp3"));
    }
}
