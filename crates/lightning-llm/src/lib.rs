//! Collaborator implementations for Lightning Links
//!
//! The core crate only knows [`lightning_core::SimilarityProvider`] and
//! [`lightning_core::CompletionProvider`]. This crate supplies:
//!
//! - [`embeddings`]: OpenAI-compatible HTTP and mock embedding providers
//! - [`EmbeddingSimilarity`]: embeddings → cosine similarity matrix
//! - [`chat`]: OpenAI-compatible and scripted completion providers

pub mod chat;
pub mod embeddings;
mod error;
pub mod similarity;

pub use chat::{MockCompletionProvider, OpenAICompletionProvider};
pub use embeddings::{EmbeddingProvider, HttpEmbeddingProvider, MockEmbeddingProvider};
pub use error::{LlmError, LlmResult};
pub use similarity::{cosine_similarity, EmbeddingSimilarity};
