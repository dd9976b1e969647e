//! # Lightning Links Core
//!
//! Keeps the related-notes section of every note in a vault in sync with a
//! similarity matrix supplied by an external collaborator.
//!
//! ```text
//! VaultRoster::scan ─▶ NoteCodec::parse ─▶ SimilarityProvider
//!        ─▶ top_k::rank_excluding ─▶ SectionUpdater ─▶ SimilarNotesIndex
//! ```
//!
//! - [`top_k`]: partial top-k selection over one matrix row
//! - [`SectionUpdater`]: idempotent rewrite of the section line
//! - [`VaultRoster`] / [`VaultIndex`]: note files and the persisted index
//! - [`RefreshOrchestrator`]: one full refresh cycle
//! - [`NoteAssistant`]: completion-backed recommend / ask / suggest / create
//!
//! Collaborators are reached only through [`SimilarityProvider`] and
//! [`CompletionProvider`].

pub mod assistant;
pub mod error;
pub mod fs_util;
pub mod index;
pub mod refresh;
pub mod top_k;
pub mod traits;
pub mod updater;
pub mod vault;

pub use assistant::{NoteAssistant, Suggestion};
pub use error::{Result, VaultError};
pub use index::{SimilarNotesIndex, VaultIndex};
pub use refresh::{RefreshOrchestrator, RefreshReport};
pub use traits::{
    CompletionProvider, CompletionRequest, ResponseSchema, SimilarityMatrix, SimilarityProvider,
};
pub use updater::SectionUpdater;
pub use vault::{ensure_trailing_separators, write_note, VaultRoster};

pub use lightning_config::{DialectConfig, RefreshConfig};
pub use lightning_parser::{LinkFormatter, Note, NoteCodec};
