//! Speech synthesis over the remote TTS REST API.

use std::collections::BTreeMap;

use async_trait::async_trait;
use futures_util::{StreamExt, TryStreamExt};
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;

use voxcache_core::{ByteStream, SpeechSynthesizer, SynthesisError, VoiceDescriptor};

use crate::config::EdgeClientConfig;

const OUTPUT_FORMAT_HEADER: &str = "X-Microsoft-OutputFormat";
const API_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Client for the remote synthesis service.
///
/// Synthesis is one POST of an SSML document answered with a chunked
/// audio body; the voice catalog is one GET returning a JSON array.
pub struct EdgeSynthesizer {
    http: reqwest::Client,
    config: EdgeClientConfig,
}

impl EdgeSynthesizer {
    /// Build a synthesizer from the given configuration.
    pub fn new(config: EdgeClientConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(key) = &self.config.api_key {
            if let Ok(value) = HeaderValue::from_str(key) {
                headers.insert(API_KEY_HEADER, value);
            }
        }
        headers
    }

    fn synthesis_url(&self) -> String {
        format!("{}/v1", self.config.base_url.trim_end_matches('/'))
    }

    fn voices_url(&self) -> String {
        format!("{}/voices/list", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl SpeechSynthesizer for EdgeSynthesizer {
    async fn stream(
        &self,
        text: &str,
        voice: &str,
        options: &BTreeMap<String, String>,
    ) -> Result<ByteStream, SynthesisError> {
        let body = build_envelope(text, voice, options);
        debug!(voice, bytes = body.len(), "requesting synthesis");

        let response = self
            .http
            .post(self.synthesis_url())
            .headers(self.auth_headers())
            .header(CONTENT_TYPE, "application/ssml+xml")
            .header(OUTPUT_FORMAT_HEADER, self.config.output_format.as_str())
            .body(body)
            .send()
            .await
            .map_err(|e| SynthesisError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() {
            let detail = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Rejected(format!("{status}: {detail}")));
        }
        if !status.is_success() {
            return Err(SynthesisError::Unavailable(format!(
                "unexpected status {status}"
            )));
        }

        Ok(response
            .bytes_stream()
            .map_err(std::io::Error::other)
            .boxed())
    }

    async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, SynthesisError> {
        let response = self
            .http
            .get(self.voices_url())
            .headers(self.auth_headers())
            .send()
            .await
            .map_err(|e| SynthesisError::Catalog(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(SynthesisError::Catalog(format!(
                "unexpected status {}",
                response.status()
            )));
        }
        response
            .json::<Vec<VoiceDescriptor>>()
            .await
            .map_err(|e| SynthesisError::Catalog(e.to_string()))
    }
}

/// Produce the SSML document sent to the service.
///
/// Text already shaped as SSML is passed through untouched; plain text
/// is escaped and wrapped in a `speak`/`voice`/`prosody` envelope built
/// from the modulation options.
fn build_envelope(text: &str, voice: &str, options: &BTreeMap<String, String>) -> String {
    let trimmed = text.trim();
    if trimmed.starts_with("<speak") {
        return trimmed.to_owned();
    }

    let lookup = |key: &str, default: &str| -> String {
        options
            .get(key)
            .map_or_else(|| default.to_owned(), |v| xml_escape(v))
    };
    let rate = lookup("rate", "0%");
    let volume = lookup("volume", "0%");
    let pitch = lookup("pitch", "0Hz");

    format!(
        "<speak version='1.0' xmlns='http://www.w3.org/2001/10/synthesis' xml:lang='en-US'>\
         <voice name='{}'><prosody rate='{rate}' volume='{volume}' pitch='{pitch}'>{}</prosody>\
         </voice></speak>",
        xml_escape(voice),
        xml_escape(trimmed),
    )
}

fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
