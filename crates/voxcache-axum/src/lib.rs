//! Axum web adapter: HTTP surface for the streaming TTS cache proxy.

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export primary types
pub use bootstrap::{AxumContext, CorsConfig, ServerConfig, bootstrap, bootstrap_with, start_server};
pub use error::HttpError;
pub use routes::create_router;
pub use state::AppState;
