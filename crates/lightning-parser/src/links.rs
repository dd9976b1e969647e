//! Inline related-links notation
//!
//! `[[science]]     [[electronics]]`: bracket links joined by fixed padding, no
//! extensions, no vault paths. [`LinkFormatter::parse`] is the left inverse of
//! [`LinkFormatter::format`] up to the note extension, which it appends back.

use lightning_config::DialectConfig;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Converts note identifiers to and from the related-links line.
#[derive(Debug, Clone)]
pub struct LinkFormatter {
    dialect: DialectConfig,
    vault_root: Option<PathBuf>,
    pattern: Regex,
}

impl LinkFormatter {
    /// Create a formatter for the given dialect.
    pub fn new(dialect: DialectConfig) -> Self {
        let pattern = link_pattern(&dialect);
        Self {
            dialect,
            vault_root: None,
            pattern,
        }
    }

    /// Strip this directory from identifiers that live under it.
    pub fn with_vault_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.vault_root = Some(root.into());
        self
    }

    /// The dialect this formatter writes.
    pub fn dialect(&self) -> &DialectConfig {
        &self.dialect
    }

    /// Bare identifier of a note: no vault prefix, no extension.
    pub fn identifier(&self, note: &str) -> String {
        let path = Path::new(note);
        let relative = self
            .vault_root
            .as_deref()
            .and_then(|root| path.strip_prefix(root).ok())
            .map(|rel| rel.to_string_lossy().into_owned())
            .unwrap_or_else(|| note.to_string());

        match relative.strip_suffix(self.dialect.note_extension.as_str()) {
            Some(stem) if !stem.is_empty() => stem.to_string(),
            _ => relative,
        }
    }

    /// Render the first `k` notes as one line of bracket links.
    ///
    /// `k = 0` or an empty list yields an empty string.
    pub fn format<S: AsRef<str>>(&self, notes: &[S], k: usize) -> String {
        let d = &self.dialect;
        notes
            .iter()
            .take(k)
            .map(|note| format!("{}{}{}", d.link_open, self.identifier(note.as_ref()), d.link_close))
            .collect::<Vec<_>>()
            .join(&d.link_padding)
    }

    /// Extract every linked identifier from a line, re-appending the note extension.
    pub fn parse(&self, line: &str) -> Vec<String> {
        self.pattern
            .captures_iter(line.trim())
            .filter_map(|cap| cap.get(1))
            .map(|m| format!("{}{}", m.as_str(), self.dialect.note_extension))
            .collect()
    }
}

fn link_pattern(dialect: &DialectConfig) -> Regex {
    // Targets never contain the first character of the close token
    let stop = dialect
        .link_close
        .chars()
        .next()
        .map(|c| regex::escape(&c.to_string()))
        .unwrap_or_default();
    let body = if stop.is_empty() {
        ".+?".to_string()
    } else {
        format!("[^{stop}]+")
    };
    let pattern = format!(
        "{}({}){}",
        regex::escape(&dialect.link_open),
        body,
        regex::escape(&dialect.link_close)
    );
    Regex::new(&pattern).expect("escaped link pattern")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter() -> LinkFormatter {
        LinkFormatter::new(DialectConfig::default())
    }

    #[test]
    fn test_format_takes_first_k_and_strips_extension() {
        let notes = ["science.md", "electronics.md", "money.md"];
        assert_eq!(formatter().format(&notes, 2), "[[science]]     [[electronics]]");
    }

    #[test]
    fn test_format_k_zero_is_empty() {
        let notes = ["science.md"];
        assert_eq!(formatter().format(&notes, 0), "");
        assert_eq!(formatter().format::<&str>(&[], 3), "");
    }

    #[test]
    fn test_format_k_beyond_len_uses_all() {
        let notes = ["a.md", "b.md"];
        assert_eq!(formatter().format(&notes, 10), "[[a]]     [[b]]");
    }

    #[test]
    fn test_format_strips_vault_root() {
        let formatter = formatter().with_vault_root("/home/me/vault");
        let notes = ["/home/me/vault/physics.md", "/home/me/vault/sub/chem.md"];
        assert_eq!(formatter.format(&notes, 2), "[[physics]]     [[sub/chem]]");
    }

    #[test]
    fn test_identifier_keeps_notes_outside_root() {
        let formatter = formatter().with_vault_root("/vault");
        assert_eq!(formatter.identifier("/elsewhere/x.md"), "/elsewhere/x");
        assert_eq!(formatter.identifier("notes.mdx"), "notes.mdx");
        assert_eq!(formatter.identifier(".md"), ".md");
    }

    #[test]
    fn test_parse_appends_extension() {
        let parsed = formatter().parse("[[science]]     [[electronics]]\n");
        assert_eq!(parsed, vec!["science.md", "electronics.md"]);
    }

    #[test]
    fn test_parse_ignores_text_between_links() {
        let parsed = formatter().parse("see [[a b]], then [[c]] ]] [[");
        assert_eq!(parsed, vec!["a b.md", "c.md"]);
    }

    #[test]
    fn test_parse_empty_line() {
        assert!(formatter().parse("").is_empty());
        assert!(formatter().parse("[[]]").is_empty());
    }

    #[test]
    fn test_custom_tokens() {
        let dialect = DialectConfig {
            link_open: "((".to_string(),
            link_close: "))".to_string(),
            link_padding: " | ".to_string(),
            note_extension: ".txt".to_string(),
            ..DialectConfig::default()
        };
        let formatter = LinkFormatter::new(dialect);
        let line = formatter.format(&["a.txt", "b.txt"], 2);
        assert_eq!(line, "((a)) | ((b))");
        assert_eq!(formatter.parse(&line), vec!["a.txt", "b.txt"]);
    }
}
