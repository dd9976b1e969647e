//! Literal tokens of the note dialect
//!
//! Every token the parser matches and the formatter writes lives here, so the
//! two can never drift apart. The defaults describe an Obsidian vault:
//!
//! ```text
//! ---                      metadata delimiter
//! [[other note]]           header link
//!
//! #tag                     tag line (not a heading)
//! body ...
//! ### Lightning Links      section marker
//! [[a]]     [[b]]          related links, five-space padding
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Immutable token record shared by the parser, the formatter and the vault scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectConfig {
    /// Line (without its line break) that opens and closes the metadata block
    pub metadata_delimiter: String,
    /// Token opening a bracket link
    pub link_open: String,
    /// Token closing a bracket link
    pub link_close: String,
    /// Padding written between two related links
    pub link_padding: String,
    /// Marker starting a tag line
    pub tag_marker: String,
    /// Line (without its line break) that starts the related-notes section
    pub section_marker: String,
    /// Extension of note files, including the dot
    pub note_extension: String,
    /// Files ending with this are never notes even though they share `note_extension`
    pub exclusive_extension: String,
    /// Vault-private sub-directory holding the persisted index
    pub index_dir: String,
    /// File name of the persisted similar-notes index
    pub index_file: String,
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self {
            metadata_delimiter: "---".to_string(),
            link_open: "[[".to_string(),
            link_close: "]]".to_string(),
            link_padding: "     ".to_string(),
            tag_marker: "#".to_string(),
            section_marker: "### Lightning Links".to_string(),
            note_extension: ".md".to_string(),
            exclusive_extension: ".excalidraw.md".to_string(),
            index_dir: ".obsidian".to_string(),
            index_file: "similar_notes.json".to_string(),
        }
    }
}

impl DialectConfig {
    /// True if `line` is exactly the metadata delimiter followed by a line break.
    pub fn is_metadata_delimiter(&self, line: &str) -> bool {
        line.strip_suffix('\n') == Some(self.metadata_delimiter.as_str())
    }

    /// True if `line` opens with the link token and ends with the close token and a line break.
    pub fn is_link_line(&self, line: &str) -> bool {
        line.starts_with(&self.link_open)
            && line
                .strip_suffix('\n')
                .is_some_and(|rest| rest.ends_with(&self.link_close))
    }

    /// True if `line` is a tag line.
    ///
    /// A heading (marker followed by a space, or a doubled marker) is not a tag.
    pub fn is_tag_line(&self, line: &str) -> bool {
        if self.tag_marker.is_empty() || !line.starts_with(&self.tag_marker) {
            return false;
        }
        let rest = &line[self.tag_marker.len()..];
        !(rest.starts_with(' ') || rest.starts_with(&self.tag_marker))
    }

    /// True if `line`, without its line break, is the section marker.
    pub fn is_section_marker(&self, line: &str) -> bool {
        line.trim_end_matches(['\n', '\r']) == self.section_marker
    }

    /// The section marker terminated by a line break.
    pub fn section_marker_line(&self) -> String {
        format!("{}\n", self.section_marker)
    }

    /// True if a file name belongs to the vault roster.
    pub fn is_note_file_name(&self, name: &str) -> bool {
        name.ends_with(&self.note_extension) && !name.ends_with(&self.exclusive_extension)
    }

    /// Directory holding the vault-private metadata.
    pub fn index_dir_path(&self, vault_root: &Path) -> PathBuf {
        vault_root.join(&self.index_dir)
    }

    /// Location of the persisted similar-notes index.
    pub fn index_path(&self, vault_root: &Path) -> PathBuf {
        self.index_dir_path(vault_root).join(&self.index_file)
    }
}
