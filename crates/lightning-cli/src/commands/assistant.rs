//! Completion-backed commands

use anyhow::{Context, Result};
use colored::Colorize;
use lightning_config::LightningConfig;

use crate::factories::{create_assistant, open_vault};

/// Execute the recommend command
pub async fn recommend(config: LightningConfig, prompt: &str) -> Result<()> {
    let assistant = create_assistant(&config)?;
    let vault = open_vault(&config)?;
    let note = assistant
        .recommend(&vault, prompt)
        .await
        .context("Recommendation failed")?;
    println!("{note}");
    Ok(())
}

/// Execute the ask command
pub async fn ask(config: LightningConfig, prompt: &str) -> Result<()> {
    let assistant = create_assistant(&config)?;
    let vault = open_vault(&config)?;
    let answer = assistant.ask(&vault, prompt).await.context("Question failed")?;
    println!("{answer}");
    Ok(())
}

/// Execute the suggest command, optionally writing the suggested note
pub async fn suggest(config: LightningConfig, create: bool) -> Result<()> {
    let assistant = create_assistant(&config)?;
    let mut vault = open_vault(&config)?;
    let suggestion = assistant.suggest(&vault).await.context("Suggestion failed")?;

    println!("{} {}", "Suggestion:".cyan().bold(), suggestion.suggestion);
    println!("{} {}", "Reasoning:".cyan().bold(), suggestion.reasoning);

    if create {
        let path = assistant
            .create(&mut vault, &suggestion.suggestion)
            .await
            .context("Failed to create the suggested note")?;
        println!("{} {}", "Created:".green().bold(), path.display());
    }
    Ok(())
}

/// Execute the create command
pub async fn create(config: LightningConfig, prompt: &str) -> Result<()> {
    let assistant = create_assistant(&config)?;
    let mut vault = open_vault(&config)?;
    let path = assistant
        .create(&mut vault, prompt)
        .await
        .context("Failed to create note")?;
    println!("{} {}", "Created:".green().bold(), path.display());
    Ok(())
}
