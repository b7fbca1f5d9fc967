//! Domain types: request shapes and the voice catalog entry.

mod request;
mod voice;

pub use request::{MAX_TEXT_CHARS, ProsodyOptions, SynthesisRequest};
pub use voice::VoiceDescriptor;
