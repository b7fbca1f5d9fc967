//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the web adapter. All concrete implementations are instantiated here.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use voxcache_core::{
    BlobStore, ProxyConfig, SpeechSynthesizer, StreamingCacheProxy, TtsSettings, VoiceCatalog,
};
use voxcache_edge::{EdgeClientConfig, EdgeSynthesizer};
use voxcache_store::FsBlobStore;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// Root directory of the audio cache.
    pub cache_dir: PathBuf,
    /// Whether synthesized audio is cached.
    pub cache_enabled: bool,
    /// Voice used when a request does not name one.
    pub default_voice: String,
    /// Base URL of the synthesis service, if not the built-in default.
    pub endpoint: Option<String>,
    /// API key for the synthesis service.
    pub api_key: Option<String>,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Build a config from the process environment, falling back to
    /// defaults for anything unset.
    #[must_use]
    pub fn from_settings(settings: &TtsSettings) -> Self {
        Self {
            port: settings.effective_port(),
            cache_dir: settings.effective_cache_dir().into(),
            cache_enabled: settings.effective_cache_enabled(),
            default_voice: settings.effective_default_voice().to_owned(),
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            cors: CorsConfig::default(),
        }
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }
}

/// Application context for the Axum adapter.
///
/// Holds all initialized services for the web server.
pub struct AxumContext {
    /// Request orchestrator: validation, cache lookup, synthesis.
    pub proxy: Arc<StreamingCacheProxy>,
    /// Shared voice catalog cache.
    pub catalog: Arc<VoiceCatalog>,
}

/// Bootstrap the Axum server with all services.
pub fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    tracing::info!(
        cache_dir = %config.cache_dir.display(),
        cache_enabled = config.cache_enabled,
        default_voice = %config.default_voice,
        "bootstrapping web adapter"
    );

    let mut edge_config = EdgeClientConfig::new().with_optional_api_key(config.api_key.clone());
    if let Some(endpoint) = &config.endpoint {
        edge_config = edge_config.with_base_url(endpoint.clone());
    }
    let synthesizer: Arc<dyn SpeechSynthesizer> = Arc::new(EdgeSynthesizer::new(edge_config)?);
    let store: Arc<dyn BlobStore> = Arc::new(FsBlobStore::new(config.cache_dir.clone()));

    Ok(bootstrap_with(synthesizer, store, config))
}

/// Assemble the context from explicit port implementations.
///
/// Integration tests use this to swap in an in-memory backend.
#[must_use]
pub fn bootstrap_with(
    synthesizer: Arc<dyn SpeechSynthesizer>,
    store: Arc<dyn BlobStore>,
    config: &ServerConfig,
) -> AxumContext {
    let catalog = Arc::new(VoiceCatalog::new(synthesizer.clone()));
    let proxy = Arc::new(StreamingCacheProxy::new(
        synthesizer,
        store,
        catalog.clone(),
        ProxyConfig {
            default_voice: config.default_voice.clone(),
            cache_enabled: config.cache_enabled,
        },
    ));
    AxumContext { proxy, catalog }
}

/// Start the web server on the configured port.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    let ctx = bootstrap(&config)?;
    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("voxcache server listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
