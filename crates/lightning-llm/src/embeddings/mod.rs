//! Embedding providers
//!
//! - [`HttpEmbeddingProvider`]: any OpenAI-compatible `/v1/embeddings` endpoint
//!   (Ollama, OpenAI, LiteLLM, vLLM)
//! - [`MockEmbeddingProvider`]: deterministic hash-based vectors for tests

mod http;
mod mock;

pub use http::HttpEmbeddingProvider;
pub use mock::MockEmbeddingProvider;

use crate::error::LlmResult;
use async_trait::async_trait;

/// Turns text into vectors.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// One embedding per input, in input order.
    async fn embed_batch(&self, texts: &[String]) -> LlmResult<Vec<Vec<f32>>>;

    /// Embedding of a single text.
    async fn embed_text(&self, text: &str) -> LlmResult<Vec<f32>> {
        self.embed_batch(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| crate::LlmError::InvalidResponse("empty embedding response".to_string()))
    }

    fn model_name(&self) -> &str;
}
