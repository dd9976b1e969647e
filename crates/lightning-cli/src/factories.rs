//! Build collaborators from configuration

use anyhow::{Context, Result};
use lightning_config::LightningConfig;
use lightning_core::{NoteAssistant, RefreshOrchestrator, VaultIndex};
use lightning_llm::{EmbeddingSimilarity, HttpEmbeddingProvider, OpenAICompletionProvider};
use tracing::debug;

pub type HttpSimilarity = EmbeddingSimilarity<HttpEmbeddingProvider>;

/// Open the configured vault and its persisted index.
pub fn open_vault(config: &LightningConfig) -> Result<VaultIndex> {
    VaultIndex::open(&config.vault.path, config.dialect.clone())
        .with_context(|| format!("Failed to open vault at {}", config.vault.path.display()))
}

/// Refresh orchestrator backed by the configured embedding endpoint.
pub fn create_orchestrator(config: &LightningConfig) -> Result<RefreshOrchestrator<HttpSimilarity>> {
    let embeddings = HttpEmbeddingProvider::from_config(&config.embedding)
        .context("Failed to create embedding provider")?;
    debug!(url = %embeddings.url(), model = %config.embedding.model, "embedding provider ready");
    let similarity = EmbeddingSimilarity::new(embeddings, config.embedding.batch_size);
    Ok(RefreshOrchestrator::new(similarity, config.refresh))
}

/// Assistant backed by the configured chat completion endpoint.
pub fn create_assistant(config: &LightningConfig) -> Result<NoteAssistant<OpenAICompletionProvider>> {
    let completion = OpenAICompletionProvider::from_config(&config.completion)
        .context("Failed to create completion provider")?;
    debug!(url = %config.completion.url, model = %config.completion.model, "completion provider ready");
    Ok(NoteAssistant::new(completion, config.refresh))
}
