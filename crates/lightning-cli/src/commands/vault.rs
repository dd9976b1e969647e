//! Commands that only read or tidy the vault; no collaborators involved.

use anyhow::{Context, Result};
use colored::Colorize;
use lightning_config::LightningConfig;
use lightning_core::ensure_trailing_separators;

use crate::factories::open_vault;

/// Execute the endings command
pub fn endings(config: LightningConfig) -> Result<()> {
    let vault = open_vault(&config)?;
    let fixed = ensure_trailing_separators(vault.roster(), vault.dialect())
        .context("Failed to fix note endings")?;
    println!(
        "{} {} of {} notes",
        "Fixed endings:".green().bold(),
        fixed,
        vault.roster().len()
    );
    Ok(())
}

/// Execute the related command: one persisted entry per line, best first.
pub fn related(config: LightningConfig, note: &str) -> Result<()> {
    let vault = open_vault(&config)?;
    let related = vault
        .related(note)
        .with_context(|| format!("No related notes recorded for '{note}'"))?;
    for entry in related {
        println!("{entry}");
    }
    Ok(())
}

/// Execute the current command
pub fn current(config: LightningConfig) -> Result<()> {
    let vault = open_vault(&config)?;
    let note = vault
        .current_note()
        .context("Could not determine the current note")?;
    println!("{note}");
    Ok(())
}
