//! In-place rewrite of a note's related-notes section
//!
//! Only the line after the section marker is ever touched. Everything else in
//! the file stays byte-identical, and the whole file is replaced atomically.

use crate::error::{Result, VaultError};
use crate::fs_util::{read_text, write_atomic};
use lightning_parser::LinkFormatter;
use std::path::Path;
use tracing::debug;

/// Writes the formatted related-links line under the section marker.
#[derive(Debug, Clone)]
pub struct SectionUpdater {
    formatter: LinkFormatter,
}

impl SectionUpdater {
    pub fn new(formatter: LinkFormatter) -> Self {
        Self { formatter }
    }

    pub fn formatter(&self) -> &LinkFormatter {
        &self.formatter
    }

    /// Show the first `k` of `related` in the note at `path`.
    ///
    /// Creates the note (and its directory) when missing. Returns `true` if
    /// the file changed; a second call with the same arguments returns `false`.
    pub fn update<S: AsRef<str>>(&self, path: &Path, related: &[S], k: usize) -> Result<bool> {
        let line = self.formatter.format(related, k);

        let content = if path.exists() {
            read_text(path)?
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| VaultError::io(parent, e))?;
            }
            String::new()
        };

        match self.rewrite(&content, &line) {
            Some(updated) => {
                write_atomic(path, &updated)?;
                debug!(path = %path.display(), links = %line, "related section updated");
                Ok(true)
            }
            None => {
                debug!(path = %path.display(), "related section unchanged");
                Ok(false)
            }
        }
    }

    /// New file contents with `formatted` as the section line, or `None` if
    /// the section already shows it.
    pub fn rewrite(&self, content: &str, formatted: &str) -> Option<String> {
        let dialect = self.formatter.dialect();
        let marker = dialect.section_marker_line();
        let new_line = format!("{formatted}\n");

        if content.is_empty() {
            return Some(format!("{marker}{new_line}"));
        }

        let lines: Vec<&str> = content.split_inclusive('\n').collect();
        let Some(pos) = lines.iter().position(|l| dialect.is_section_marker(l)) else {
            let mut out = terminated(content);
            out.push_str(&marker);
            out.push_str(&new_line);
            return Some(out);
        };

        match lines.get(pos + 1) {
            Some(current) if current.trim() == formatted.trim() => None,
            Some(_) => {
                let mut out = String::with_capacity(content.len() + new_line.len());
                for (i, l) in lines.iter().enumerate() {
                    if i == pos + 1 {
                        out.push_str(&new_line);
                    } else {
                        out.push_str(l);
                    }
                }
                Some(out)
            }
            None => {
                let mut out = terminated(content);
                out.push_str(&new_line);
                Some(out)
            }
        }
    }
}

fn terminated(content: &str) -> String {
    let mut out = content.to_string();
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
