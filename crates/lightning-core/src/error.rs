//! Vault error types

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors surfaced by vault operations and the refresh cycle.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Vault directory not found: {0}")]
    VaultNotFound(PathBuf),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No persisted index yet; callers treat this as a first run.
    #[error("Similar-notes index not found: {0}")]
    IndexMissing(PathBuf),

    #[error("No entry for {0} in the similar-notes index")]
    IndexKeyMissing(String),

    #[error("Malformed index file {path}: {source}")]
    IndexCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Similarity matrix shape mismatch: expected {expected}x{expected}, got {actual}")]
    MatrixShape { expected: usize, actual: String },

    #[error("Similarity provider failed: {0}")]
    Similarity(String),

    #[error("Completion provider failed: {0}")]
    Completion(String),

    #[error("No note named {0} in the vault")]
    UnknownNote(String),

    #[error("Refusing to overwrite existing note {0}")]
    NoteExists(PathBuf),
}

impl VaultError {
    /// Attach a path to an I/O error.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// True for errors meaning "nothing persisted yet" rather than a failure.
    pub fn is_lookup_miss(&self) -> bool {
        matches!(self, Self::IndexMissing(_) | Self::IndexKeyMissing(_))
    }
}

/// Result type for vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;
