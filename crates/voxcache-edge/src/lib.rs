//! HTTP client for the remote text-to-speech service, implementing the
//! synthesis port.

mod config;
mod synthesizer;

pub use config::EdgeClientConfig;
pub use synthesizer::EdgeSynthesizer;
