//! Cache-prune command handler.

use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use voxcache_core::CachePruner;

use crate::bootstrap::CliContext;

/// Execute the cache-prune command.
///
/// A run that deletes nothing is still a success; only a failure to
/// list the cache at all is an error.
pub async fn execute(ctx: &CliContext, days: u32) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Pruning cache entries older than {days} days..."));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let pruner = CachePruner::new(ctx.store.clone());
    let report = pruner
        .prune(days)
        .await
        .context("failed to list the audio cache")?;

    spinner.finish_and_clear();

    println!(
        "Pruned {} entries ({} kept, {} failed)",
        report.deleted, report.skipped, report.failed
    );
    if report.failed > 0 {
        println!("Some entries could not be removed; see the log for details");
    }
    Ok(())
}
