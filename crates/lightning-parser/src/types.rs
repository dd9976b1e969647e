//! Parsed note fields

use crate::links::LinkFormatter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One vault entry split into its dialect sections.
///
/// Every raw field keeps its lines verbatim, line breaks included, so that
/// writing the fields back in order reproduces the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// File the note was read from; primary key within a vault
    pub path: PathBuf,
    /// Metadata block including both delimiter lines, if the file opens with one
    pub metadata_block: Option<String>,
    /// Header link lines (`[[note]]\n`), in order
    pub header_links: Vec<String>,
    /// Whitespace-only separator after the header links, when it is not a
    /// bare line break; written back verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_separator: Option<String>,
    /// Tag lines, in order
    pub tags: Vec<String>,
    /// Main content up to the section marker or end of file
    pub body: String,
    /// Non-blank lines following the section marker, if the marker exists
    pub related_section_raw: Option<String>,
    /// Related notes (with extension), from the existing section or a ranking
    pub related_notes: Vec<String>,
}

impl Note {
    /// Empty note bound to a path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// True if the file already carried a related-notes section.
    pub fn has_related_section(&self) -> bool {
        self.related_section_raw.is_some()
    }

    /// Link targets of the header block, without brackets.
    pub fn header_link_targets(&self, formatter: &LinkFormatter) -> Vec<String> {
        self.header_links
            .iter()
            .flat_map(|line| formatter.parse(line))
            .collect()
    }

    /// Individual tag tokens across all tag lines.
    pub fn tag_tokens(&self) -> Vec<&str> {
        self.tags
            .iter()
            .flat_map(|line| line.split_whitespace())
            .collect()
    }

    /// Replace the related notes and the section line that displays them.
    ///
    /// References to the note itself are dropped; the section shows the
    /// first `k` remaining entries.
    pub fn set_related(&mut self, related: Vec<String>, formatter: &LinkFormatter, k: usize) {
        let own = formatter.identifier(&self.path.to_string_lossy());
        self.related_notes = related
            .into_iter()
            .filter(|note| formatter.identifier(note) != own)
            .collect();

        let line = formatter.format(&self.related_notes, k);
        self.related_section_raw = Some(format!("{line}\n"));
    }
}
