//! Process-wide read-through cache of the backend voice catalog.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::VoiceDescriptor;
use crate::ports::{SpeechSynthesizer, SynthesisError};
use crate::settings::VOICE_CATALOG_TTL;

struct Snapshot {
    fetched_at: Instant,
    voices: Arc<Vec<VoiceDescriptor>>,
}

/// Lazily-populated, TTL-bounded cache of the voice catalog.
///
/// Voice catalogs change rarely, so readers of an expired snapshot get
/// the stale value immediately while a single background refresh runs
/// (stale-while-revalidate); nobody blocks on a refresh except the very
/// first caller, who has nothing to fall back on.
pub struct VoiceCatalog {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    ttl: Duration,
    snapshot: RwLock<Option<Snapshot>>,
    refresh_in_flight: AtomicBool,
}

impl VoiceCatalog {
    /// Create a catalog cache with the default TTL.
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self::with_ttl(synthesizer, VOICE_CATALOG_TTL)
    }

    /// Create a catalog cache with a custom TTL (used by tests).
    pub fn with_ttl(synthesizer: Arc<dyn SpeechSynthesizer>, ttl: Duration) -> Self {
        Self {
            synthesizer,
            ttl,
            snapshot: RwLock::new(None),
            refresh_in_flight: AtomicBool::new(false),
        }
    }

    /// The current voice list.
    ///
    /// Fetches inline only when the cache is cold; afterwards the cached
    /// list is returned even past its TTL while a refresh runs in the
    /// background.
    pub async fn voices(self: &Arc<Self>) -> Result<Arc<Vec<VoiceDescriptor>>, SynthesisError> {
        if let Some(snapshot) = self.snapshot.read().await.as_ref() {
            if snapshot.fetched_at.elapsed() >= self.ttl {
                self.spawn_refresh();
            }
            return Ok(snapshot.voices.clone());
        }

        // Cold start: fetch inline. Concurrent cold callers may fetch
        // twice; the last write wins and both get a valid list.
        let voices = Arc::new(self.synthesizer.list_voices().await?);
        *self.snapshot.write().await = Some(Snapshot {
            fetched_at: Instant::now(),
            voices: voices.clone(),
        });
        debug!(count = voices.len(), "voice catalog populated");
        Ok(voices)
    }

    /// Whether `short_name` names a known voice.
    ///
    /// A catalog that cannot be fetched counts as "unknown": callers
    /// validating a user-supplied voice fail closed, mirroring the
    /// behavior of the upstream validation rule.
    pub async fn contains(self: &Arc<Self>, short_name: &str) -> bool {
        match self.voices().await {
            Ok(voices) => voices.iter().any(|v| v.short_name == short_name),
            Err(e) => {
                warn!(error = %e, "voice catalog unavailable; treating voice as unknown");
                false
            }
        }
    }

    fn spawn_refresh(self: &Arc<Self>) {
        if self
            .refresh_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }
        let catalog = Arc::clone(self);
        tokio::spawn(async move {
            match catalog.synthesizer.list_voices().await {
                Ok(voices) => {
                    let count = voices.len();
                    *catalog.snapshot.write().await = Some(Snapshot {
                        fetched_at: Instant::now(),
                        voices: Arc::new(voices),
                    });
                    debug!(count, "voice catalog refreshed");
                }
                Err(e) => {
                    // Keep serving the stale snapshot; the next expired
                    // read will retry.
                    warn!(error = %e, "voice catalog refresh failed");
                }
            }
            catalog.refresh_in_flight.store(false, Ordering::Release);
        });
    }
}
