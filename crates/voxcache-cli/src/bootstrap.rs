//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter. Command handlers receive the composed context
//! and delegate to core services.

use std::sync::Arc;

use anyhow::Result;

use voxcache_core::{BlobStore, SpeechSynthesizer, TtsSettings};
use voxcache_edge::{EdgeClientConfig, EdgeSynthesizer};
use voxcache_store::FsBlobStore;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Settings resolved from the environment.
    pub settings: TtsSettings,
}

impl CliConfig {
    /// Create config from `VOXCACHE_*` environment variables.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            settings: TtsSettings::from_env(),
        }
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// Cache storage backend.
    pub store: Arc<dyn BlobStore>,
    /// Remote synthesis client.
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    /// Resolved settings.
    pub settings: TtsSettings,
}

/// Bootstrap the CLI context.
pub fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let settings = config.settings;

    let mut edge_config =
        EdgeClientConfig::new().with_optional_api_key(settings.api_key.clone());
    if let Some(endpoint) = &settings.endpoint {
        edge_config = edge_config.with_base_url(endpoint.clone());
    }

    let synthesizer: Arc<dyn SpeechSynthesizer> = Arc::new(EdgeSynthesizer::new(edge_config)?);
    let store: Arc<dyn BlobStore> = Arc::new(FsBlobStore::new(settings.effective_cache_dir()));

    Ok(CliContext {
        store,
        synthesizer,
        settings,
    })
}
