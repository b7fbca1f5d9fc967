//! Streaming cache proxy: validate, hash, replay or synthesize-and-tee.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error, info, warn};

use crate::domain::{MAX_TEXT_CHARS, ProsodyOptions, SynthesisRequest};
use crate::error::ProxyError;
use crate::fingerprint::CacheKey;
use crate::ports::{BlobStore, BlobStoreError, ByteStream, SpeechSynthesizer};
use crate::services::VoiceCatalog;
use crate::ssml::is_valid_ssml;

/// Maximum accepted length of a voice short name.
const MAX_VOICE_CHARS: usize = 100;

/// Buffered chunk slots between the backend reader and the client.
const TEE_CHANNEL_CAPACITY: usize = 8;

/// The proxy's answer to a synthesis request.
pub enum AudioReply {
    /// Replay of a previously cached artifact. The total size is known
    /// up front, so callers can set an exact `Content-Length`.
    CacheHit { len: u64, stream: ByteStream },

    /// Live synthesis; length unknown until the backend finishes.
    Fresh { stream: ByteStream },
}

// Manual impl: the stream field is an opaque boxed stream.
impl fmt::Debug for AudioReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CacheHit { len, .. } => f
                .debug_struct("CacheHit")
                .field("len", len)
                .finish_non_exhaustive(),
            Self::Fresh { .. } => f.debug_struct("Fresh").finish_non_exhaustive(),
        }
    }
}

/// Behavioral knobs for [`StreamingCacheProxy`].
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Voice used when the request does not name one.
    pub default_voice: String,
    /// When false, every request takes the fresh path and nothing is
    /// written to the store.
    pub cache_enabled: bool,
}

/// Orchestrates a single request through validation, cache lookup and
/// backend synthesis.
///
/// Identical requests map to the same [`CacheKey`]; the first one pays
/// for synthesis and populates the store, later ones replay the cached
/// bytes without touching the backend.
pub struct StreamingCacheProxy {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    store: Arc<dyn BlobStore>,
    catalog: Arc<VoiceCatalog>,
    config: ProxyConfig,
}

impl StreamingCacheProxy {
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        store: Arc<dyn BlobStore>,
        catalog: Arc<VoiceCatalog>,
        config: ProxyConfig,
    ) -> Self {
        Self {
            synthesizer,
            store,
            catalog,
            config,
        }
    }

    /// Handle one synthesis request end to end.
    ///
    /// Validation failures never reach the backend. A cache entry that
    /// disappears between the existence check and the read (concurrent
    /// prune) falls back to fresh synthesis; any other cache read failure
    /// is an error, never a silent re-synthesis.
    pub async fn handle(&self, request: SynthesisRequest) -> Result<AudioReply, ProxyError> {
        // Trimmed text feeds everything downstream, so padded and
        // unpadded variants of one input share a cache entry.
        let text = request.text.as_deref().unwrap_or_default().trim();
        if text.is_empty() {
            return Err(ProxyError::Validation("The text field is required.".into()));
        }
        if text.chars().count() > MAX_TEXT_CHARS {
            return Err(ProxyError::Validation(format!(
                "The text field must not be greater than {MAX_TEXT_CHARS} characters."
            )));
        }

        // SSML documents carry their own prosody, so modulation options
        // are dropped from both the backend call and the cache key.
        let options: BTreeMap<String, String> = if request.is_ssml() {
            if !is_valid_ssml(text) {
                error!("rejected malformed SSML document");
                return Err(ProxyError::SsmlSyntax(
                    "the document is not well-formed SSML".into(),
                ));
            }
            BTreeMap::new()
        } else {
            ProsodyOptions::from_request(&request)
                .map_err(ProxyError::Validation)?
                .to_map()
        };

        let voice = self.resolve_voice(request.voice.as_deref()).await?;
        let key = CacheKey::derive(text, &voice, &options);
        let path = key.blob_path();

        if self.config.cache_enabled {
            match self.replay(&path).await? {
                Some(reply) => {
                    info!(key = %key, "cache hit");
                    return Ok(reply);
                }
                None => debug!(key = %key, "cache miss"),
            }
        }

        let backend = self
            .synthesizer
            .stream(text, &voice, &options)
            .await
            .map_err(|e| ProxyError::Synthesis(e.to_string()))?;

        let stream = if self.config.cache_enabled {
            self.tee_into_cache(backend, path)
        } else {
            backend
        };
        Ok(AudioReply::Fresh { stream })
    }

    async fn resolve_voice(&self, requested: Option<&str>) -> Result<String, ProxyError> {
        let Some(voice) = requested.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(self.config.default_voice.clone());
        };
        if voice.chars().count() > MAX_VOICE_CHARS {
            return Err(ProxyError::Validation(format!(
                "The voice field must not be greater than {MAX_VOICE_CHARS} characters."
            )));
        }
        if !self.catalog.contains(voice).await {
            return Err(ProxyError::Validation(
                "The selected voice is not available.".into(),
            ));
        }
        Ok(voice.to_owned())
    }

    /// Attempt to replay a cached artifact. `Ok(None)` means miss,
    /// including the entry vanishing mid-lookup.
    async fn replay(&self, path: &str) -> Result<Option<AudioReply>, ProxyError> {
        match self.store.exists(path).await {
            Ok(false) => return Ok(None),
            Ok(true) => {}
            Err(e) => return Err(ProxyError::CacheRead(e.to_string())),
        }

        let len = match self.store.size(path).await {
            Ok(len) => len,
            Err(BlobStoreError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(ProxyError::CacheRead(e.to_string())),
        };
        let stream = match self.store.open_read(path).await {
            Ok(stream) => stream,
            Err(BlobStoreError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(ProxyError::CacheRead(e.to_string())),
        };
        Ok(Some(AudioReply::CacheHit { len, stream }))
    }

    /// Forward the backend stream to the client while accumulating a
    /// copy, written to the store once the stream completes.
    ///
    /// The write is best-effort: a failure is logged and the client's
    /// already-delivered audio is unaffected. If the client disconnects
    /// mid-stream the partial buffer is discarded, so the cache only
    /// ever holds complete artifacts.
    fn tee_into_cache(&self, mut backend: ByteStream, path: String) -> ByteStream {
        let store = Arc::clone(&self.store);
        let (tx, rx) = mpsc::channel::<std::io::Result<Bytes>>(TEE_CHANNEL_CAPACITY);

        tokio::spawn(async move {
            let mut buffer = Vec::new();
            while let Some(item) = backend.next().await {
                match item {
                    Ok(chunk) => {
                        buffer.extend_from_slice(&chunk);
                        if tx.send(Ok(chunk)).await.is_err() {
                            debug!(path, "client went away; discarding partial audio");
                            return;
                        }
                    }
                    Err(e) => {
                        warn!(path, error = %e, "backend stream failed mid-flight");
                        let _ = tx.send(Err(e)).await;
                        return;
                    }
                }
            }
            drop(tx);

            let len = buffer.len();
            match store.write(&path, Bytes::from(buffer)).await {
                Ok(()) => info!(path, bytes = len, "cached synthesized audio"),
                Err(e) => warn!(path, error = %e, "failed to cache synthesized audio"),
            }
        });

        ReceiverStream::new(rx).boxed()
    }
}
