//! The similarity refresh cycle
//!
//! ```text
//! scan roster ─▶ ensure separators ─▶ parse notes ─▶ similarity matrix
//!      ─▶ rank each row (self excluded) ─▶ update sections ─▶ save index
//! ```
//!
//! Notes are processed one after another. Any I/O failure aborts the cycle;
//! sections already rewritten stay rewritten and the index keeps its previous
//! contents until a cycle completes.

use crate::error::{Result, VaultError};
use crate::index::{SimilarNotesIndex, VaultIndex};
use crate::top_k::rank_excluding;
use crate::traits::SimilarityProvider;
use crate::updater::SectionUpdater;
use crate::vault::ensure_trailing_separators;
use lightning_config::RefreshConfig;
use lightning_parser::NoteCodec;
use std::time::Instant;
use tracing::{debug, info};

/// Outcome of one refresh cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Notes in the roster
    pub notes: usize,
    /// Notes that needed a trailing blank line
    pub separators_added: usize,
    /// Notes whose related section changed on disk
    pub sections_changed: usize,
}

/// Runs refresh cycles against one similarity provider.
pub struct RefreshOrchestrator<P: SimilarityProvider> {
    provider: P,
    settings: RefreshConfig,
}

impl<P: SimilarityProvider> RefreshOrchestrator<P> {
    pub fn new(provider: P, settings: RefreshConfig) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> RefreshConfig {
        self.settings
    }

    /// Recompute every note's related section and persist the index.
    pub async fn refresh(&self, vault: &mut VaultIndex) -> Result<RefreshReport> {
        let started = Instant::now();
        vault.rescan()?;
        let dialect = vault.dialect().clone();
        let roster = vault.roster().clone();
        let codec = NoteCodec::for_vault(dialect.clone(), roster.root());
        let updater = SectionUpdater::new(codec.formatter().clone());

        let mut report = RefreshReport {
            notes: roster.len(),
            ..RefreshReport::default()
        };
        info!(root = %roster.root().display(), notes = report.notes, "starting refresh");

        report.separators_added = ensure_trailing_separators(&roster, &dialect)?;

        let mut bodies = Vec::with_capacity(roster.len());
        for path in roster.paths() {
            let note = codec.parse_file(path).map_err(|e| VaultError::io(path, e))?;
            bodies.push(note.body);
        }
        debug!(elapsed_ms = started.elapsed().as_millis() as u64, "notes parsed");

        if roster.is_empty() {
            vault.save(SimilarNotesIndex::new())?;
            return Ok(report);
        }

        let matrix = self.provider.similarity_matrix(&bodies).await?;
        if matrix.len() != roster.len() {
            return Err(VaultError::MatrixShape {
                expected: roster.len(),
                actual: format!("{}x{}", matrix.len(), matrix.len()),
            });
        }
        info!(
            provider = self.provider.name(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "similarity matrix ready"
        );

        let mut index = SimilarNotesIndex::new();
        for (i, row) in matrix.rows().enumerate() {
            let related: Vec<String> = rank_excluding(row, i, self.settings.similar_count)
                .into_iter()
                .filter_map(|j| roster.key(j))
                .collect();

            let path = &roster.paths()[i];
            if updater.update(path, &related, self.settings.links_count)? {
                report.sections_changed += 1;
            }
            if let Some(key) = roster.key(i) {
                index.insert(key, related);
            }
        }

        vault.save(index)?;
        info!(
            changed = report.sections_changed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "refresh complete"
        );
        Ok(report)
    }
}
