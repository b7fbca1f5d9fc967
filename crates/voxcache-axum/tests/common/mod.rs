//! Shared test doubles for route tests.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::{StreamExt, stream};

use voxcache_axum::bootstrap::{AxumContext, CorsConfig, ServerConfig, bootstrap_with};
use voxcache_core::{ByteStream, SpeechSynthesizer, SynthesisError, VoiceDescriptor};
use voxcache_store::FsBlobStore;

/// Audio payload every stub synthesis yields.
pub const STUB_AUDIO: &[u8] = b"ID3stub-mpeg-frames";

/// Synthesizer double with a fixed catalog and canned audio.
pub struct StubSynthesizer {
    pub synth_calls: AtomicUsize,
}

impl StubSynthesizer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            synth_calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for StubSynthesizer {
    async fn stream(
        &self,
        _text: &str,
        _voice: &str,
        _options: &BTreeMap<String, String>,
    ) -> Result<ByteStream, SynthesisError> {
        self.synth_calls.fetch_add(1, Ordering::SeqCst);
        let chunks: Vec<std::io::Result<Bytes>> = STUB_AUDIO
            .chunks(4)
            .map(|c| Ok(Bytes::copy_from_slice(c)))
            .collect();
        Ok(stream::iter(chunks).boxed())
    }

    async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, SynthesisError> {
        Ok(vec![
            VoiceDescriptor {
                short_name: "fr-FR-DeniseNeural".into(),
                locale: "fr-FR".into(),
                local_name: "Denise".into(),
                gender: "Female".into(),
            },
            VoiceDescriptor {
                short_name: "en-US-AriaNeural".into(),
                locale: "en-US".into(),
                local_name: "Aria".into(),
                gender: "Female".into(),
            },
        ])
    }
}

/// Context backed by the stub synthesizer and a temp-dir blob store.
///
/// Returns the temp dir guard so the cache survives the whole test.
pub fn test_context(
    synthesizer: Arc<StubSynthesizer>,
    cache_enabled: bool,
) -> (tempfile::TempDir, AxumContext) {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = ServerConfig {
        port: 0,
        cache_dir: dir.path().to_path_buf(),
        cache_enabled,
        default_voice: "fr-FR-DeniseNeural".into(),
        endpoint: None,
        api_key: None,
        cors: CorsConfig::AllowAll,
    };
    let store = Arc::new(FsBlobStore::new(dir.path()));
    let ctx = bootstrap_with(synthesizer, store, &config);
    (dir, ctx)
}
