//! Command handlers, one module per subcommand.

pub mod prune;
pub mod serve;
pub mod voices;
