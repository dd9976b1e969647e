//! Persisted similar-notes index and the vault handle that owns it

use crate::error::{Result, VaultError};
use crate::fs_util::{read_text, write_atomic};
use crate::vault::VaultRoster;
use lightning_config::DialectConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Workspace state file kept by the editor next to the index.
const WORKSPACE_FILE: &str = "workspace.json";

/// Note key → related note keys, most similar first.
///
/// Keys and values are vault-relative file names (`physics.md`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimilarNotesIndex {
    entries: BTreeMap<String, Vec<String>>,
}

impl SimilarNotesIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, related: Vec<String>) {
        self.entries.insert(key.into(), related);
    }

    /// Related notes of `key`, or [`VaultError::IndexKeyMissing`].
    pub fn lookup(&self, key: &str) -> Result<&[String]> {
        self.entries
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| VaultError::IndexKeyMissing(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.entries.iter()
    }

    /// Read an index file; [`VaultError::IndexMissing`] if there is none.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(VaultError::IndexMissing(path.to_path_buf()));
        }
        let text = read_text(path)?;
        serde_json::from_str(&text).map_err(|source| VaultError::IndexCorrupt {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replace the index file atomically, 4-space indented.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)
            .map_err(|source| VaultError::IndexCorrupt {
                path: path.to_path_buf(),
                source,
            })?;
        let mut text = String::from_utf8_lossy(&buf).into_owned();
        text.push('\n');
        write_atomic(path, &text)
    }
}

impl FromIterator<(String, Vec<String>)> for SimilarNotesIndex {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// An opened vault: its roster plus the last persisted index.
///
/// Owned by one caller at a time; [`VaultIndex::rescan`] refreshes the roster
/// explicitly rather than on every access.
#[derive(Debug, Clone)]
pub struct VaultIndex {
    dialect: DialectConfig,
    roster: VaultRoster,
    similar: SimilarNotesIndex,
}

impl VaultIndex {
    /// Scan the vault and load its index, treating a missing index as empty.
    pub fn open(root: &Path, dialect: DialectConfig) -> Result<Self> {
        let roster = VaultRoster::scan(root, &dialect)?;
        let index_path = dialect.index_path(root);
        let similar = match SimilarNotesIndex::load(&index_path) {
            Ok(index) => {
                debug!(path = %index_path.display(), entries = index.len(), "loaded similar-notes index");
                index
            }
            Err(VaultError::IndexMissing(path)) => {
                warn!(path = %path.display(), "no similar-notes index yet; run a refresh first");
                SimilarNotesIndex::new()
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            dialect,
            roster,
            similar,
        })
    }

    pub fn root(&self) -> &Path {
        self.roster.root()
    }

    pub fn dialect(&self) -> &DialectConfig {
        &self.dialect
    }

    pub fn roster(&self) -> &VaultRoster {
        &self.roster
    }

    pub fn similar(&self) -> &SimilarNotesIndex {
        &self.similar
    }

    pub fn index_path(&self) -> PathBuf {
        self.dialect.index_path(self.root())
    }

    /// Re-list the vault directory.
    pub fn rescan(&mut self) -> Result<()> {
        self.roster = VaultRoster::scan(self.roster.root(), &self.dialect)?;
        Ok(())
    }

    /// Persisted related notes of a note given by name or file name.
    pub fn related(&self, note: &str) -> Result<&[String]> {
        self.similar.lookup(&self.key_for(note))
    }

    /// Persist `index` and make it the current one.
    pub fn save(&mut self, index: SimilarNotesIndex) -> Result<()> {
        let path = self.index_path();
        index.save(&path)?;
        info!(path = %path.display(), entries = index.len(), "saved similar-notes index");
        self.similar = index;
        Ok(())
    }

    /// Note most recently opened in the editor, as a vault-relative file name.
    pub fn current_note(&self) -> Result<String> {
        let path = self.dialect.index_dir_path(self.root()).join(WORKSPACE_FILE);
        if !path.exists() {
            return Err(VaultError::IndexMissing(path));
        }
        let text = read_text(&path)?;
        let workspace: serde_json::Value =
            serde_json::from_str(&text).map_err(|source| VaultError::IndexCorrupt {
                path: path.clone(),
                source,
            })?;

        workspace
            .get("lastOpenFiles")
            .and_then(|files| files.get(0))
            .and_then(|first| first.as_str())
            .map(str::to_string)
            .ok_or_else(|| VaultError::IndexKeyMissing("lastOpenFiles".to_string()))
    }

    /// Index key (file name with extension) for a note name.
    pub fn key_for(&self, note: &str) -> String {
        let ext = &self.dialect.note_extension;
        if note.ends_with(ext.as_str()) {
            note.to_string()
        } else {
            format!("{note}{ext}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> SimilarNotesIndex {
        [
            ("a.md".to_string(), vec!["c.md".to_string(), "b.md".to_string()]),
            ("b.md".to_string(), vec!["c.md".to_string()]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_save_uses_four_space_indent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".obsidian/similar_notes.json");
        sample().save(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n    \"a.md\": [\n        \"c.md\","));
        assert_eq!(SimilarNotesIndex::load(&path).unwrap(), sample());
    }

    #[test]
    fn test_load_missing_file_is_lookup_miss() {
        let err = SimilarNotesIndex::load(Path::new("/nowhere/similar_notes.json")).unwrap_err();
        assert!(matches!(err, VaultError::IndexMissing(_)));
        assert!(err.is_lookup_miss());
    }

    #[test]
    fn test_lookup_missing_key() {
        let err = sample().lookup("z.md").unwrap_err();
        assert!(matches!(err, VaultError::IndexKeyMissing(ref k) if k == "z.md"));
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("similar_notes.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            SimilarNotesIndex::load(&path),
            Err(VaultError::IndexCorrupt { .. })
        ));
    }

    #[test]
    fn test_open_without_index_is_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.md"), "x").unwrap();

        let vault = VaultIndex::open(dir.path(), DialectConfig::default()).unwrap();
        assert!(vault.similar().is_empty());
        assert_eq!(vault.roster().len(), 1);
        assert!(matches!(
            vault.related("a"),
            Err(VaultError::IndexKeyMissing(_))
        ));
    }

    #[test]
    fn test_save_then_related_by_name() {
        let dir = TempDir::new().unwrap();
        let mut vault = VaultIndex::open(dir.path(), DialectConfig::default()).unwrap();
        vault.save(sample()).unwrap();

        let reopened = VaultIndex::open(dir.path(), DialectConfig::default()).unwrap();
        assert_eq!(reopened.related("a").unwrap(), &["c.md", "b.md"]);
        assert_eq!(reopened.related("b.md").unwrap(), &["c.md"]);
    }

    #[test]
    fn test_current_note_reads_workspace() {
        let dir = TempDir::new().unwrap();
        let vault = VaultIndex::open(dir.path(), DialectConfig::default()).unwrap();
        assert!(matches!(vault.current_note(), Err(VaultError::IndexMissing(_))));

        std::fs::create_dir(dir.path().join(".obsidian")).unwrap();
        std::fs::write(
            dir.path().join(".obsidian/workspace.json"),
            r#"{"main": {}, "lastOpenFiles": ["circuits.md", "ohm.md"]}"#,
        )
        .unwrap();
        assert_eq!(vault.current_note().unwrap(), "circuits.md");

        std::fs::write(dir.path().join(".obsidian/workspace.json"), r#"{"lastOpenFiles": []}"#)
            .unwrap();
        assert!(matches!(
            vault.current_note(),
            Err(VaultError::IndexKeyMissing(_))
        ));
    }
}
