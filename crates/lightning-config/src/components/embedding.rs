//! Embedding collaborator settings

use serde::{Deserialize, Serialize};

/// Endpoint settings for an OpenAI-compatible `/v1/embeddings` service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Full embeddings endpoint URL
    #[serde(default = "default_embedding_url")]
    pub url: String,
    /// Model name sent with each request
    #[serde(default = "default_embedding_model")]
    pub model: String,
    /// Bearer token for authenticated endpoints
    #[serde(default)]
    pub api_key: Option<String>,
    /// Expected vector size; responses of another size are rejected when set
    #[serde(default)]
    pub dimensions: Option<usize>,
    /// Bodies sent per request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_embedding_url() -> String {
    "http://localhost:11434/v1/embeddings".to_string()
}

fn default_embedding_model() -> String {
    "nomic-embed-text".to_string()
}

fn default_batch_size() -> usize {
    32
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            url: default_embedding_url(),
            model: default_embedding_model(),
            api_key: None,
            dimensions: None,
            batch_size: default_batch_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
