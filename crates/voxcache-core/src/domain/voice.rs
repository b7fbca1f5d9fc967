//! Voice catalog entry as delivered by the synthesis service.

use serde::{Deserialize, Serialize};

/// A single voice in the backend's catalog.
///
/// The wire shape is PascalCase (`ShortName`, `Locale`, ...) because that
/// is what the upstream voices endpoint returns; this crate consumes the
/// list purely as a validation lookup table and passes it through to
/// clients unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoiceDescriptor {
    /// Identifier used in synthesis requests (e.g. `fr-FR-DeniseNeural`).
    pub short_name: String,
    /// BCP-47 locale tag (e.g. `fr-FR`).
    pub locale: String,
    /// Display name in the voice's own language.
    pub local_name: String,
    /// Voice gender label as reported by the service.
    pub gender: String,
}
