//! Serve command handler.

use std::path::PathBuf;

use anyhow::Result;

use voxcache_axum::{ServerConfig, start_server};
use voxcache_core::TtsSettings;

/// Execute the serve command.
///
/// Builds the server configuration from the environment, applies any
/// command-line overrides, and runs until interrupted.
pub async fn execute(
    settings: &TtsSettings,
    port: Option<u16>,
    cache_dir: Option<PathBuf>,
    no_cache: bool,
) -> Result<()> {
    let mut config = ServerConfig::from_settings(settings);
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(dir) = cache_dir {
        config.cache_dir = dir;
    }
    if no_cache {
        config.cache_enabled = false;
    }

    println!(
        "Serving on http://localhost:{} (cache: {})",
        config.port,
        if config.cache_enabled { "on" } else { "off" }
    );
    println!("Press Ctrl+C to stop");

    start_server(config).await
}
