//! Services: the streaming cache proxy, the voice catalog cache and the
//! cache pruner.

mod pruner;
mod stream_proxy;
mod voice_catalog;

pub use pruner::{CachePruner, PruneReport};
pub use stream_proxy::{AudioReply, ProxyConfig, StreamingCacheProxy};
pub use voice_catalog::VoiceCatalog;
