//! HTTP embedding provider

use super::EmbeddingProvider;
use crate::error::{LlmError, LlmResult};
use async_trait::async_trait;
use lightning_config::EmbeddingConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Client for the OpenAI `/v1/embeddings` request format.
#[derive(Clone)]
pub struct HttpEmbeddingProvider {
    client: reqwest::Client,
    url: String,
    model: String,
    api_key: Option<String>,
    dimensions: Option<usize>,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl HttpEmbeddingProvider {
    pub fn new(url: String, model: String, api_key: Option<String>, timeout_secs: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            model,
            api_key: api_key.filter(|k| !k.is_empty()),
            dimensions: None,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Provider for the configured endpoint.
    pub fn from_config(config: &EmbeddingConfig) -> LlmResult<Self> {
        if config.url.trim().is_empty() {
            return Err(LlmError::Config("embedding url is empty".to_string()));
        }
        let mut provider = Self::new(
            config.url.clone(),
            config.model.clone(),
            config.api_key.clone(),
            config.timeout_secs,
        );
        provider.dimensions = config.dimensions;
        Ok(provider)
    }

    /// Reject vectors of any other size.
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request_embeddings(&self, texts: &[String]) -> LlmResult<Vec<Vec<f32>>> {
        let body = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        let mut req = self.client.post(&self.url).json(&body).timeout(self.timeout);
        if let Some(ref key) = self.api_key {
            req = req.header("Authorization", format!("Bearer {}", key));
        }

        let response = req.send().await.map_err(|source| LlmError::Http {
            url: self.url.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .ok()
                .and_then(|e| e.error)
                .map(|d| d.message)
                .unwrap_or(text);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse embedding response: {}", e)))?;

        let mut data = parsed.data;
        if data.len() != texts.len() {
            return Err(LlmError::InvalidResponse(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                data.len()
            )));
        }
        data.sort_by_key(|d| d.index);

        let embeddings: Vec<Vec<f32>> = data.into_iter().map(|d| d.embedding).collect();
        if let Some(expected) = self.dimensions {
            if let Some((index, emb)) = embeddings
                .iter()
                .enumerate()
                .find(|(_, e)| e.len() != expected)
            {
                return Err(LlmError::DimensionMismatch {
                    index,
                    expected,
                    actual: emb.len(),
                });
            }
        }

        debug!(model = %self.model, count = embeddings.len(), "embedded batch");
        Ok(embeddings)
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingProvider {
    async fn embed_batch(&self, texts: &[String]) -> LlmResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request_embeddings(texts).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
