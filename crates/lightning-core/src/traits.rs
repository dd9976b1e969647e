//! Collaborator abstractions
//!
//! The refresh cycle and the note assistant only see these traits. Concrete
//! HTTP and mock implementations live in `lightning-llm`; tests plug in
//! fixed matrices and scripted replies.

use crate::error::{Result, VaultError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Square matrix of pairwise scores in roster order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    rows: Vec<Vec<f32>>,
}

impl SimilarityMatrix {
    /// Build from rows, rejecting anything that is not square.
    pub fn new(rows: Vec<Vec<f32>>) -> Result<Self> {
        let n = rows.len();
        if let Some(bad) = rows.iter().find(|row| row.len() != n) {
            return Err(VaultError::MatrixShape {
                expected: n,
                actual: format!("{n}x{}", bad.len()),
            });
        }
        Ok(Self { rows })
    }

    /// Number of rows (and columns).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, i: usize) -> Option<&[f32]> {
        self.rows.get(i).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

/// Produces the similarity matrix for an ordered list of note bodies.
#[async_trait]
pub trait SimilarityProvider: Send + Sync {
    /// Scores for every pair of `bodies`, row and column order matching the input.
    async fn similarity_matrix(&self, bodies: &[String]) -> Result<SimilarityMatrix>;

    /// Provider name for logs.
    fn name(&self) -> &str {
        "similarity"
    }
}

/// JSON schema the reply must follow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSchema {
    pub name: String,
    pub schema: serde_json::Value,
}

/// One system + user exchange with the completion service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    /// When set, the reply is a JSON document matching this schema.
    pub schema: Option<ResponseSchema>,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>, temperature: f32) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature,
            schema: None,
        }
    }

    pub fn with_schema(mut self, name: impl Into<String>, schema: serde_json::Value) -> Self {
        self.schema = Some(ResponseSchema {
            name: name.into(),
            schema,
        });
        self
    }
}

/// Text generation service.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Reply text; JSON text when the request carries a schema.
    async fn complete(&self, request: CompletionRequest) -> Result<String>;

    fn model_name(&self) -> &str {
        "completion"
    }
}
