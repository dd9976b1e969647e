//! OpenAI chat completion provider

use crate::error::{LlmError, LlmResult};
use async_trait::async_trait;
use lightning_config::CompletionConfig;
use lightning_core::{CompletionProvider, CompletionRequest, Result, VaultError};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Client for `/chat/completions` on OpenAI or any compatible server.
pub struct OpenAICompletionProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

impl OpenAICompletionProvider {
    pub fn new(api_key: Option<String>, base_url: Option<String>, model: String, timeout_secs: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url: base_url
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
                .trim_end_matches('/')
                .to_string(),
            model,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Provider for the configured endpoint; the hosted API needs a key.
    pub fn from_config(config: &CompletionConfig) -> LlmResult<Self> {
        let provider = Self::new(
            config.api_key.clone(),
            Some(config.url.clone()),
            config.model.clone(),
            config.timeout_secs,
        );
        if provider.api_key.is_none() && provider.base_url.contains("api.openai.com") {
            return Err(LlmError::Config(
                "no completion API key; set OPENAI_API_KEY or completion.api_key".to_string(),
            ));
        }
        Ok(provider)
    }

    fn request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "temperature": request.temperature,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user },
            ],
        });

        if let Some(schema) = &request.schema {
            body["response_format"] = serde_json::json!({
                "type": "json_schema",
                "json_schema": {
                    "name": schema.name,
                    "schema": schema.schema,
                    "strict": true,
                }
            });
        }
        body
    }

    /// Run one chat exchange and return the reply text.
    pub async fn chat(&self, request: &CompletionRequest) -> LlmResult<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let mut req = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&self.request_body(request))
            .timeout(self.timeout);
        if let Some(key) = &self.api_key {
            req = req.header("Authorization", format!("Bearer {}", key));
        }

        let response = req
            .send()
            .await
            .map_err(|source| LlmError::Http { url: url.clone(), source })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let parsed: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let message = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("No choices in response".to_string()))?
            .message;

        match (message.content, message.refusal) {
            (Some(content), _) => {
                debug!(model = %self.model, chars = content.len(), "completion received");
                Ok(content)
            }
            (None, Some(refusal)) => Err(LlmError::InvalidResponse(format!("model refused: {refusal}"))),
            (None, None) => Err(LlmError::InvalidResponse("empty message".to_string())),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAICompletionProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        self.chat(&request)
            .await
            .map_err(|e| VaultError::Completion(e.to_string()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
