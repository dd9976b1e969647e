//! Completion collaborator settings

use serde::{Deserialize, Serialize};

/// Endpoint settings for an OpenAI-compatible chat completion service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Base URL; `/chat/completions` is appended
    #[serde(default = "default_completion_url")]
    pub url: String,
    /// Model name
    #[serde(default = "default_completion_model")]
    pub model: String,
    /// Bearer token
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_completion_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_completion_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            url: default_completion_url(),
            model: default_completion_model(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}
