//! Main commands enum and primary subcommands.

use std::path::PathBuf;

use clap::Subcommand;

use voxcache_core::DEFAULT_RETENTION_DAYS;

/// Available commands for the TTS cache proxy.
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on (overrides VOXCACHE_PORT)
        #[arg(short, long)]
        port: Option<u16>,
        /// Cache directory (overrides VOXCACHE_CACHE_DIR)
        #[arg(long)]
        cache_dir: Option<PathBuf>,
        /// Disable the audio cache for this run
        #[arg(long)]
        no_cache: bool,
    },

    /// Delete cached audio older than the retention window
    CachePrune {
        /// Remove entries last modified more than this many days ago
        #[arg(long, default_value_t = DEFAULT_RETENTION_DAYS)]
        days: u32,
    },

    /// List the voices offered by the synthesis backend
    Voices,
}
