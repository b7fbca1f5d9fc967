//! Inbound synthesis request shape and prosody validation.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

/// Maximum accepted text length, in characters.
pub const MAX_TEXT_CHARS: usize = 5000;

/// Neutral prosody defaults applied when a field is absent.
const DEFAULT_RATE: &str = "0%";
const DEFAULT_VOLUME: &str = "0%";
const DEFAULT_PITCH: &str = "0Hz";

static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?\d{1,3}%$").expect("valid percentage pattern"));
static FREQUENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?\d{1,3}Hz$").expect("valid frequency pattern"));

/// An inbound synthesis request, typically deserialized from a query
/// string.
///
/// All fields are optional at the wire level so that presence and length
/// checks happen in one place ([`crate::StreamingCacheProxy::handle`])
/// with uniform error reporting, rather than half in the deserializer.
/// When `text` carries SSML (it starts with the `<speak` root marker)
/// the prosody fields are ignored by the backend — SSML carries its own
/// prosody — but they remain part of the struct for API uniformity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SynthesisRequest {
    /// Text or SSML document to synthesize (required, 1..=5000 chars).
    pub text: Option<String>,
    /// Voice short name; falls back to the configured default when unset.
    pub voice: Option<String>,
    /// Speaking rate offset, e.g. `-10%` (plain-text mode only).
    pub rate: Option<String>,
    /// Volume offset, e.g. `+25%` (plain-text mode only).
    pub volume: Option<String>,
    /// Pitch offset, e.g. `+2Hz` (plain-text mode only).
    pub pitch: Option<String>,
}

/// Validated modulation options for a plain-text synthesis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProsodyOptions {
    pub rate: String,
    pub volume: String,
    pub pitch: String,
}

impl ProsodyOptions {
    /// Validate the raw prosody fields of a request, defaulting absent
    /// fields to neutral values.
    ///
    /// Returns a human-readable message naming the offending field on
    /// failure.
    pub fn from_request(req: &SynthesisRequest) -> Result<Self, String> {
        let rate = validated(req.rate.as_deref(), &PERCENT_RE, "rate", DEFAULT_RATE)?;
        let volume = validated(req.volume.as_deref(), &PERCENT_RE, "volume", DEFAULT_VOLUME)?;
        let pitch = validated(req.pitch.as_deref(), &FREQUENCY_RE, "pitch", DEFAULT_PITCH)?;
        Ok(Self {
            rate,
            volume,
            pitch,
        })
    }

    /// Canonical options map used for cache-key derivation and handed to
    /// the synthesis backend. `BTreeMap` gives a stable key order.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("rate".to_string(), self.rate.clone()),
            ("volume".to_string(), self.volume.clone()),
            ("pitch".to_string(), self.pitch.clone()),
        ])
    }
}

fn validated(
    value: Option<&str>,
    pattern: &Regex,
    field: &str,
    default: &str,
) -> Result<String, String> {
    match value {
        None => Ok(default.to_string()),
        Some(v) if pattern.is_match(v) => Ok(v.to_string()),
        Some(v) => Err(format!("The {field} field format is invalid: {v}")),
    }
}

impl SynthesisRequest {
    /// Whether the (trimmed) text announces itself as SSML.
    pub fn is_ssml(&self) -> bool {
        self.text
            .as_deref()
            .is_some_and(|t| t.trim().starts_with("<speak"))
    }
}
