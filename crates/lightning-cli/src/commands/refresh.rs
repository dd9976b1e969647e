use anyhow::{Context, Result};
use colored::Colorize;
use lightning_config::LightningConfig;
use tracing::info;

use crate::factories::{create_orchestrator, open_vault};

/// Execute the refresh command
pub async fn execute(config: LightningConfig) -> Result<()> {
    let orchestrator = create_orchestrator(&config)?;
    let mut vault = open_vault(&config)?;
    info!(vault = %config.vault.path.display(), "refreshing Lightning Links");

    let report = orchestrator
        .refresh(&mut vault)
        .await
        .context("Refresh failed")?;

    println!(
        "{} {} notes, {} sections updated",
        "Refreshed:".green().bold(),
        report.notes,
        report.sections_changed
    );
    if report.separators_added > 0 {
        println!("{} trailing blank lines added", report.separators_added);
    }
    Ok(())
}
