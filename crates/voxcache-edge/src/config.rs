//! Public configuration for the synthesis client.

use std::time::Duration;

/// Configuration for [`crate::EdgeSynthesizer`].
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use voxcache_edge::EdgeClientConfig;
/// use std::time::Duration;
///
/// let config = EdgeClientConfig::new()
///     .with_base_url("https://tts.example.com/cognitiveservices")
///     .with_timeout(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct EdgeClientConfig {
    /// Base URL of the synthesis service
    pub(crate) base_url: String,
    /// Optional subscription key sent with every request
    pub(crate) api_key: Option<String>,
    /// Audio container and bitrate requested from the service
    pub(crate) output_format: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
}

impl Default for EdgeClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://tts.speech.microsoft.com/cognitiveservices".to_string(),
            api_key: None,
            output_format: "audio-24khz-48kbitrate-mono-mp3".to_string(),
            user_agent: concat!("voxcache-edge/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl EdgeClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the synthesis service.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the subscription key sent with every request.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set an optional subscription key.
    #[must_use]
    pub fn with_optional_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    /// Set the requested audio output format.
    ///
    /// Defaults to `audio-24khz-48kbitrate-mono-mp3`.
    #[must_use]
    pub fn with_output_format(mut self, format: impl Into<String>) -> Self {
        self.output_format = format.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EdgeClientConfig::new();
        assert!(config.base_url.starts_with("https://"));
        assert!(config.api_key.is_none());
        assert!(config.user_agent.contains("voxcache-edge"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_builder_pattern() {
        let config = EdgeClientConfig::new()
            .with_base_url("https://custom.tts/")
            .with_api_key("secret")
            .with_output_format("audio-16khz-32kbitrate-mono-mp3")
            .with_timeout(Duration::from_secs(60));

        assert_eq!(config.base_url, "https://custom.tts/");
        assert_eq!(config.api_key, Some("secret".to_string()));
        assert_eq!(config.output_format, "audio-16khz-32kbitrate-mono-mp3");
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_optional_api_key() {
        let with_key = EdgeClientConfig::new().with_optional_api_key(Some("key".to_string()));
        assert_eq!(with_key.api_key, Some("key".to_string()));

        let without_key = EdgeClientConfig::new().with_optional_api_key(None);
        assert!(without_key.api_key.is_none());
    }
}
