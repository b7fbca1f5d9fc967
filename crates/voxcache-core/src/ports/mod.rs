//! Port traits implemented by adapter crates.

mod blob_store;
mod synthesizer;

pub use blob_store::{BlobStore, BlobStoreError};
pub use synthesizer::{ByteStream, SpeechSynthesizer, SynthesisError};
