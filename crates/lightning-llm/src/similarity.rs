//! Similarity matrix from embeddings

use crate::embeddings::EmbeddingProvider;
use crate::error::LlmError;
use async_trait::async_trait;
use lightning_core::{Result, SimilarityMatrix, SimilarityProvider, VaultError};
use tracing::{debug, info};

/// Cosine similarity; 0 for mismatched lengths or zero vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// [`SimilarityProvider`] backed by any [`EmbeddingProvider`].
pub struct EmbeddingSimilarity<P: EmbeddingProvider> {
    provider: P,
    batch_size: usize,
}

impl<P: EmbeddingProvider> EmbeddingSimilarity<P> {
    /// Embed at most `batch_size` bodies per request (at least one).
    pub fn new(provider: P, batch_size: usize) -> Self {
        Self {
            provider,
            batch_size: batch_size.max(1),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    async fn embed_all(&self, bodies: &[String]) -> std::result::Result<Vec<Vec<f32>>, LlmError> {
        let mut all = Vec::with_capacity(bodies.len());
        for (batch, chunk) in bodies.chunks(self.batch_size).enumerate() {
            let mut embeddings = self.provider.embed_batch(chunk).await?;
            if embeddings.len() != chunk.len() {
                return Err(LlmError::InvalidResponse(format!(
                    "batch {batch}: expected {} embeddings, got {}",
                    chunk.len(),
                    embeddings.len()
                )));
            }
            debug!(batch, size = chunk.len(), "embedded bodies");
            all.append(&mut embeddings);
        }

        if let Some(first) = all.first() {
            let expected = first.len();
            if let Some((index, emb)) = all.iter().enumerate().find(|(_, e)| e.len() != expected) {
                return Err(LlmError::DimensionMismatch {
                    index,
                    expected,
                    actual: emb.len(),
                });
            }
        }
        Ok(all)
    }
}

#[async_trait]
impl<P: EmbeddingProvider> SimilarityProvider for EmbeddingSimilarity<P> {
    async fn similarity_matrix(&self, bodies: &[String]) -> Result<SimilarityMatrix> {
        let embeddings = self
            .embed_all(bodies)
            .await
            .map_err(|e| VaultError::Similarity(e.to_string()))?;

        let rows: Vec<Vec<f32>> = embeddings
            .iter()
            .map(|a| embeddings.iter().map(|b| cosine_similarity(a, b)).collect())
            .collect();

        info!(
            model = self.provider.model_name(),
            notes = rows.len(),
            "built similarity matrix"
        );
        SimilarityMatrix::new(rows)
    }

    fn name(&self) -> &str {
        self.provider.model_name()
    }
}
