//! Deterministic cache-key derivation for synthesis requests.

use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Write as _;

use serde_json::json;
use sha2::{Digest, Sha256};

/// Number of digest bytes kept in a key (128 bits).
const KEY_BYTES: usize = 16;

/// A 128-bit fingerprint identifying semantically-equal synthesis
/// requests, rendered as 32 lowercase hex characters.
///
/// Two requests with identical `(text, voice, options)` always collide
/// into the same key; the options map is a `BTreeMap` so key order is
/// canonical by construction and insertion order can never leak into the
/// digest. Collision resistance beyond accidental collision is not
/// required — the key only names cache artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for a `(text, voice, options)` triple.
    ///
    /// The canonical form is the JSON serialization of the triple;
    /// SHA-256 of that form, truncated to 128 bits, is the key.
    pub fn derive(text: &str, voice: &str, options: &BTreeMap<String, String>) -> Self {
        let canonical = json!({
            "text": text,
            "voice": voice,
            "options": options,
        });
        let digest = Sha256::digest(canonical.to_string().as_bytes());
        let hex = digest[..KEY_BYTES].iter().fold(
            String::with_capacity(KEY_BYTES * 2),
            |mut acc, byte| {
                let _ = write!(acc, "{byte:02x}");
                acc
            },
        );
        Self(hex)
    }

    /// The hex form of the key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Relative blob-store path of the audio artifact for this key.
    pub fn blob_path(&self) -> String {
        format!("tts/{}.mp3", self.0)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn derivation_is_deterministic() {
        let opts = options(&[("rate", "0%"), ("volume", "0%"), ("pitch", "0Hz")]);
        let a = CacheKey::derive("Hello", "fr-FR-DeniseNeural", &opts);
        let b = CacheKey::derive("Hello", "fr-FR-DeniseNeural", &opts);
        assert_eq!(a, b);
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let forward = options(&[("pitch", "0Hz"), ("rate", "0%"), ("volume", "0%")]);
        let reverse = options(&[("volume", "0%"), ("rate", "0%"), ("pitch", "0Hz")]);
        assert_eq!(
            CacheKey::derive("Hello", "voice", &forward),
            CacheKey::derive("Hello", "voice", &reverse)
        );
    }

    #[test]
    fn single_character_change_changes_key() {
        let opts = BTreeMap::new();
        assert_ne!(
            CacheKey::derive("Hello", "voice", &opts),
            CacheKey::derive("Hello!", "voice", &opts)
        );
    }

    #[test]
    fn voice_is_part_of_the_key() {
        let opts = BTreeMap::new();
        assert_ne!(
            CacheKey::derive("Hello", "fr-FR-DeniseNeural", &opts),
            CacheKey::derive("Hello", "en-US-AriaNeural", &opts)
        );
    }

    #[test]
    fn options_are_part_of_the_key() {
        assert_ne!(
            CacheKey::derive("Hello", "voice", &options(&[("rate", "0%")])),
            CacheKey::derive("Hello", "voice", &options(&[("rate", "-10%")]))
        );
    }

    #[test]
    fn key_is_32_hex_chars() {
        let key = CacheKey::derive("Hello", "voice", &BTreeMap::new());
        assert_eq!(key.as_str().len(), 32);
        assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn blob_path_has_audio_extension() {
        let key = CacheKey::derive("Hello", "voice", &BTreeMap::new());
        assert_eq!(key.blob_path(), format!("tts/{key}.mp3"));
    }
}
