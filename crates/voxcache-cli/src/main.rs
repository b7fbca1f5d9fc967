//! CLI entry point - the composition root.
//!
//! Command dispatch routes to handlers which delegate to core services.

use clap::{CommandFactory, Parser};

use voxcache_cli::{Cli, CliConfig, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before logging so RUST_LOG from .env applies
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt::init();
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = CliConfig::with_defaults();

    match command {
        Commands::Serve {
            port,
            cache_dir,
            no_cache,
        } => {
            let settings = config.settings.clone();
            handlers::serve::execute(&settings, port, cache_dir, no_cache).await
        }
        Commands::CachePrune { days } => {
            let ctx = bootstrap(config)?;
            handlers::prune::execute(&ctx, days).await
        }
        Commands::Voices => {
            let ctx = bootstrap(config)?;
            handlers::voices::execute(&ctx).await
        }
    }
}
