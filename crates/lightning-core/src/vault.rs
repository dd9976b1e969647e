//! Vault roster and whole-vault file maintenance

use crate::error::{Result, VaultError};
use crate::fs_util::{read_text, write_atomic};
use lightning_config::DialectConfig;
use lightning_parser::{Note, NoteCodec};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Note files of a vault directory, in a stable (sorted) order.
///
/// Recomputed by [`VaultRoster::scan`] whenever it is needed; the roster
/// order is the row/column order of the similarity matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VaultRoster {
    root: PathBuf,
    paths: Vec<PathBuf>,
    names: Vec<String>,
}

impl VaultRoster {
    /// List the note files directly under `root`.
    ///
    /// A missing directory is fatal ([`VaultError::VaultNotFound`]).
    pub fn scan(root: &Path, dialect: &DialectConfig) -> Result<Self> {
        if !root.is_dir() {
            return Err(VaultError::VaultNotFound(root.to_path_buf()));
        }

        let entries = std::fs::read_dir(root).map_err(|e| VaultError::io(root, e))?;
        let mut files: Vec<String> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| VaultError::io(root, e))?;
            // symlinked notes count; dangling links do not
            if !entry.path().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                debug!(path = %entry.path().display(), "skipping non UTF-8 file name");
                continue;
            };
            if dialect.is_note_file_name(&name) {
                files.push(name);
            }
        }
        files.sort();

        let paths = files.iter().map(|f| root.join(f)).collect();
        let names = files
            .iter()
            .map(|f| {
                f.strip_suffix(dialect.note_extension.as_str())
                    .unwrap_or(f)
                    .to_string()
            })
            .collect();

        debug!(root = %root.display(), notes = files.len(), "vault roster scanned");
        Ok(Self {
            root: root.to_path_buf(),
            paths,
            names,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full paths of every note.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Note identifiers: file names without the note extension.
    pub fn note_names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Vault-relative key of the note at `index` (its file name).
    pub fn key(&self, index: usize) -> Option<String> {
        self.paths
            .get(index)
            .and_then(|p| p.file_name())
            .map(|f| f.to_string_lossy().into_owned())
    }

    /// Resolve an identifier, with or without extension, to its file.
    pub fn path_for(&self, name: &str) -> Option<&Path> {
        self.names
            .iter()
            .position(|n| n == name)
            .or_else(|| self.keys().position(|k| k == name))
            .map(|i| self.paths[i].as_path())
    }

    fn keys(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.len()).filter_map(|i| self.key(i))
    }
}

/// Give every note a safe insertion point for a future related section.
///
/// A note is left alone when it is empty, already ends with a blank line, or
/// already ends with the section (marker as the last or second-to-last line).
/// Otherwise one blank line is appended. Returns the number of notes changed;
/// a second call changes nothing.
pub fn ensure_trailing_separators(roster: &VaultRoster, dialect: &DialectConfig) -> Result<usize> {
    let mut changed = 0;
    for path in roster.paths() {
        let content = read_text(path)?;
        if let Some(suffix) = separator_suffix(&content, dialect) {
            let mut updated = content;
            updated.push_str(suffix);
            write_atomic(path, &updated)?;
            debug!(path = %path.display(), "appended trailing blank line");
            changed += 1;
        }
    }
    if changed > 0 {
        info!(changed, "ensured trailing separators");
    }
    Ok(changed)
}

fn separator_suffix(content: &str, dialect: &DialectConfig) -> Option<&'static str> {
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let last = lines.last()?;

    if last.trim().is_empty() || dialect.is_section_marker(last) {
        return None;
    }
    if lines.len() >= 2 && dialect.is_section_marker(lines[lines.len() - 2]) {
        return None;
    }

    // an unterminated last line needs its own line break first
    Some(if last.ends_with('\n') { "\n" } else { "\n\n" })
}

/// Write a note back to disk in canonical form.
///
/// The note's own file is dropped from its related list, and the section
/// displays the first `k` remaining entries.
pub fn write_note(codec: &NoteCodec, note: &mut Note, k: usize) -> Result<()> {
    let related = std::mem::take(&mut note.related_notes);
    note.set_related(related, codec.formatter(), k);
    write_atomic(&note.path, &codec.serialize(note))?;
    debug!(path = %note.path.display(), "note written");
    Ok(())
}
