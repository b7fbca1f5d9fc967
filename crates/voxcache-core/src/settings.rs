//! Runtime settings with environment-based loading.
//!
//! These are pure domain types; the binary decides when to call
//! [`TtsSettings::from_env`] (after dotenvy has populated the process
//! environment).

use std::time::Duration;

/// Voice used when a request does not name one.
pub const DEFAULT_VOICE: &str = "fr-FR-DeniseNeural";

/// Default port for the HTTP server.
pub const DEFAULT_SERVER_PORT: u16 = 9707;

/// Default cache retention for the pruner, in days.
pub const DEFAULT_RETENTION_DAYS: u32 = 90;

/// Default cache directory, relative to the working directory.
pub const DEFAULT_CACHE_DIR: &str = "./cache";

/// How long a fetched voice catalog stays fresh.
pub const VOICE_CATALOG_TTL: Duration = Duration::from_secs(3600);

/// Application settings.
///
/// All fields are optional to support partial configuration and graceful
/// defaults; use the `effective_*` accessors to read resolved values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TtsSettings {
    /// Fallback voice for requests without one.
    pub default_voice: Option<String>,
    /// Whether synthesized audio is cached at all.
    pub cache_enabled: Option<bool>,
    /// Root directory of the blob store.
    pub cache_dir: Option<String>,
    /// HTTP server port.
    pub port: Option<u16>,
    /// Base URL of the synthesis service.
    pub endpoint: Option<String>,
    /// API key for the synthesis service, if it requires one.
    pub api_key: Option<String>,
}

impl TtsSettings {
    /// Load settings from `VOXCACHE_*` environment variables.
    ///
    /// Unset or unparsable variables are left as `None` and resolve to
    /// defaults through the `effective_*` accessors.
    pub fn from_env() -> Self {
        Self {
            default_voice: env_string("VOXCACHE_DEFAULT_VOICE"),
            cache_enabled: env_string("VOXCACHE_CACHE_ENABLED").and_then(|v| parse_bool(&v)),
            cache_dir: env_string("VOXCACHE_CACHE_DIR"),
            port: env_string("VOXCACHE_PORT").and_then(|v| v.parse().ok()),
            endpoint: env_string("VOXCACHE_ENDPOINT"),
            api_key: env_string("VOXCACHE_API_KEY"),
        }
    }

    /// The effective default voice.
    pub fn effective_default_voice(&self) -> &str {
        self.default_voice.as_deref().unwrap_or(DEFAULT_VOICE)
    }

    /// Whether caching is effectively enabled (defaults to true).
    pub fn effective_cache_enabled(&self) -> bool {
        self.cache_enabled.unwrap_or(true)
    }

    /// The effective cache directory.
    pub fn effective_cache_dir(&self) -> &str {
        self.cache_dir.as_deref().unwrap_or(DEFAULT_CACHE_DIR)
    }

    /// The effective HTTP port.
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_SERVER_PORT)
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
