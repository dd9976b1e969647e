use anyhow::{Context, Result};
use colored::Colorize;
use lightning_config::LightningConfig;
use std::path::PathBuf;

use crate::cli::ConfigCommands;

/// Execute config subcommand
pub fn execute(cmd: ConfigCommands, config: Option<&LightningConfig>) -> Result<()> {
    match cmd {
        ConfigCommands::Init { path, force } => init(path, force),
        ConfigCommands::Show => show(config),
    }
}

/// Initialize a new config file
fn init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = match path {
        Some(path) => path,
        None => LightningConfig::default_config_path()
            .context("Could not determine config file path")?,
    };

    if config_path.exists() && !force {
        println!(
            "{} Config file already exists at: {}",
            "Error:".red().bold(),
            config_path.display()
        );
        println!("Use {} to overwrite", "--force".yellow());
        return Ok(());
    }

    LightningConfig::create_example(&config_path)?;
    println!(
        "{} Created config file at: {}",
        "Success:".green().bold(),
        config_path.display()
    );
    println!("\n{}", "Edit this file to point at your vault.".dimmed());
    Ok(())
}

/// Show the effective configuration
fn show(config: Option<&LightningConfig>) -> Result<()> {
    let config = config.context("No configuration loaded")?;
    print!("{}", config.to_toml()?);
    Ok(())
}
