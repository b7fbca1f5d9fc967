//! Voices command handler.

use anyhow::{Context, Result};

use crate::bootstrap::CliContext;

/// Execute the voices command: print the backend catalog.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let voices = ctx
        .synthesizer
        .list_voices()
        .await
        .context("failed to fetch the voice catalog")?;

    if voices.is_empty() {
        println!("The backend reported no voices");
        return Ok(());
    }

    println!("{:<40} {:<10} {:<20} {}", "SHORT NAME", "LOCALE", "NAME", "GENDER");
    for voice in &voices {
        println!(
            "{:<40} {:<10} {:<20} {}",
            voice.short_name, voice.locale, voice.local_name, voice.gender
        );
    }
    println!("\n{} voices available", voices.len());
    Ok(())
}
