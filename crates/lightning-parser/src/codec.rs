//! Note dialect scanner and writer
//!
//! Parsing is one left-to-right pass over the lines of a note, driven by an
//! explicit state machine. No state looks back; a state either consumes the
//! current line or hands it to the next state unconsumed.
//!
//! ```text
//! Start ─▶ Metadata ─▶ Links ─▶ Separator ─▶ Tags ─▶ Body ─▶ Section ─▶ Done
//!   │                   ▲  │                  ▲        │
//!   └───────────────────┘  └──────────────────┘        └──▶ Done (EOF)
//! ```
//!
//! Malformed input never fails: an unterminated metadata block swallows the
//! rest of the file, and a missing section marker lets the body run to EOF.

use crate::links::LinkFormatter;
use crate::types::Note;
use lightning_config::DialectConfig;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Start,
    Metadata,
    Links,
    Separator,
    Tags,
    Body,
    Section,
    Done,
}

/// Parses raw note text into [`Note`] fields and writes them back.
#[derive(Debug, Clone)]
pub struct NoteCodec {
    formatter: LinkFormatter,
}

impl NoteCodec {
    /// Codec for a dialect, without vault-root stripping.
    pub fn new(dialect: DialectConfig) -> Self {
        Self {
            formatter: LinkFormatter::new(dialect),
        }
    }

    /// Codec whose formatter strips `root` from identifiers.
    pub fn for_vault(dialect: DialectConfig, root: impl Into<std::path::PathBuf>) -> Self {
        Self {
            formatter: LinkFormatter::new(dialect).with_vault_root(root),
        }
    }

    /// Formatter shared with the related-notes section.
    pub fn formatter(&self) -> &LinkFormatter {
        &self.formatter
    }

    /// Dialect tokens.
    pub fn dialect(&self) -> &DialectConfig {
        self.formatter.dialect()
    }

    /// Split raw note text into its fields.
    pub fn parse(&self, path: impl Into<std::path::PathBuf>, text: &str) -> Note {
        let d = self.dialect();
        let mut note = Note::new(path);
        let mut metadata = String::new();
        let mut section: Option<String> = None;
        let mut lines = text.split_inclusive('\n').peekable();
        let mut state = ScanState::Start;

        while state != ScanState::Done {
            state = match state {
                ScanState::Start => match lines.peek() {
                    Some(line) if d.is_metadata_delimiter(line) => {
                        metadata.push_str(line);
                        lines.next();
                        ScanState::Metadata
                    }
                    _ => ScanState::Links,
                },
                ScanState::Metadata => match lines.next() {
                    Some(line) => {
                        metadata.push_str(line);
                        if d.is_metadata_delimiter(line) {
                            ScanState::Links
                        } else {
                            ScanState::Metadata
                        }
                    }
                    None => {
                        debug!(path = %note.path.display(), "metadata block not closed before EOF");
                        ScanState::Done
                    }
                },
                ScanState::Links => match lines.peek() {
                    Some(line) if d.is_link_line(line) => {
                        note.header_links.push(line.to_string());
                        lines.next();
                        ScanState::Links
                    }
                    _ if note.header_links.is_empty() => ScanState::Tags,
                    _ => ScanState::Separator,
                },
                ScanState::Separator => {
                    if let Some(line) = lines.next() {
                        if line.trim().is_empty() {
                            if line != "\n" {
                                note.link_separator = Some(line.to_string());
                            }
                        } else {
                            warn!(
                                path = %note.path.display(),
                                line = line.trim_end(),
                                "header links not followed by a blank line; line consumed as separator"
                            );
                        }
                    }
                    ScanState::Tags
                }
                ScanState::Tags => match lines.peek() {
                    Some(line) if d.is_tag_line(line) => {
                        note.tags.push(line.to_string());
                        lines.next();
                        ScanState::Tags
                    }
                    _ => ScanState::Body,
                },
                ScanState::Body => match lines.next() {
                    Some(line) if d.is_section_marker(line) => {
                        section = Some(String::new());
                        ScanState::Section
                    }
                    Some(line) => {
                        note.body.push_str(line);
                        ScanState::Body
                    }
                    None => ScanState::Done,
                },
                ScanState::Section => match lines.next() {
                    Some(line) if !line.trim().is_empty() => {
                        if let Some(raw) = section.as_mut() {
                            raw.push_str(line);
                        }
                        ScanState::Section
                    }
                    _ => ScanState::Done,
                },
                ScanState::Done => ScanState::Done,
            };
        }

        if lines.peek().is_some() {
            debug!(path = %note.path.display(), "content after the related-notes section is not retained");
        }

        if !metadata.is_empty() {
            note.metadata_block = Some(metadata);
        }
        if let Some(raw) = section {
            note.related_notes = self.formatter.parse(&raw);
            note.related_section_raw = Some(raw);
        }
        note
    }

    /// Read and parse a note file.
    pub fn parse_file(&self, path: &Path) -> std::io::Result<Note> {
        let text = std::fs::read_to_string(path)?;
        Ok(self.parse(path, &text))
    }

    /// Write the fields back as note text.
    ///
    /// The output always carries a related-notes section, so notes parsed
    /// without one gain an (empty) section.
    pub fn serialize(&self, note: &Note) -> String {
        let d = self.dialect();
        let mut out = String::new();

        if let Some(metadata) = note.metadata_block.as_deref() {
            out.push_str(metadata);
        }
        for link in &note.header_links {
            push_line(&mut out, link);
        }
        if !note.header_links.is_empty() {
            push_line(&mut out, note.link_separator.as_deref().unwrap_or("\n"));
        }
        for tag in &note.tags {
            push_line(&mut out, tag);
        }
        out.push_str(&note.body);

        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&d.section_marker_line());
        if let Some(raw) = note.related_section_raw.as_deref() {
            out.push_str(raw);
        }
        out
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    if !line.ends_with('\n') {
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> NoteCodec {
        NoteCodec::new(DialectConfig::default())
    }

    const FULL_NOTE: &str = "---\naliases: [ohm]\n---\n[[Physics]]\n[[Circuits]]\n\n#electronics\n#draft\n# Resistors\nA resistor limits current.\n\n### Lightning Links\n[[capacitors]]     [[voltage]]\n";

    #[test]
    fn test_parse_all_sections() {
        let note = codec().parse("resistors.md", FULL_NOTE);

        assert_eq!(note.metadata_block.as_deref(), Some("---\naliases: [ohm]\n---\n"));
        assert_eq!(note.header_links, vec!["[[Physics]]\n", "[[Circuits]]\n"]);
        assert_eq!(note.tags, vec!["#electronics\n", "#draft\n"]);
        assert_eq!(note.body, "# Resistors\nA resistor limits current.\n\n");
        assert_eq!(
            note.related_section_raw.as_deref(),
            Some("[[capacitors]]     [[voltage]]\n")
        );
        assert_eq!(note.related_notes, vec!["capacitors.md", "voltage.md"]);
    }

    #[test]
    fn test_round_trip_with_section() {
        let codec = codec();
        let note = codec.parse("resistors.md", FULL_NOTE);
        assert_eq!(codec.serialize(&note), FULL_NOTE);
    }

    #[test]
    fn test_empty_file() {
        let note = codec().parse("empty.md", "");
        assert_eq!(note, Note::new("empty.md"));
    }

    #[test]
    fn test_metadata_only() {
        let note = codec().parse("meta.md", "---\ntitle: x\n---\n");
        assert_eq!(note.metadata_block.as_deref(), Some("---\ntitle: x\n---\n"));
        assert!(note.header_links.is_empty());
        assert!(note.tags.is_empty());
        assert!(note.body.is_empty());
        assert!(note.related_section_raw.is_none());
    }

    #[test]
    fn test_unterminated_metadata_consumes_to_eof() {
        let text = "---\ntitle: x\nbody that looks like metadata\n";
        let note = codec().parse("broken.md", text);
        assert_eq!(note.metadata_block.as_deref(), Some(text));
        assert!(note.body.is_empty());
    }

    #[test]
    fn test_delimiter_later_in_file_is_body() {
        let note = codec().parse("rule.md", "intro\n---\nmore\n");
        assert!(note.metadata_block.is_none());
        assert_eq!(note.body, "intro\n---\nmore\n");
    }

    #[test]
    fn test_heading_is_body_not_tag() {
        let note = codec().parse("h.md", "# Title\n#tag\n");
        assert!(note.tags.is_empty());
        assert_eq!(note.body, "# Title\n#tag\n");
    }

    #[test]
    fn test_tags_without_links() {
        let note = codec().parse("t.md", "#a #b\n#c\nbody\n");
        assert!(note.header_links.is_empty());
        assert_eq!(note.tags, vec!["#a #b\n", "#c\n"]);
        assert_eq!(note.body, "body\n");
    }

    #[test]
    fn test_links_without_blank_line_consume_next_line() {
        let note = codec().parse("l.md", "[[Home]]\n#tag\nbody\n");
        assert_eq!(note.header_links, vec!["[[Home]]\n"]);
        assert!(note.tags.is_empty());
        assert_eq!(note.body, "body\n");
    }

    #[test]
    fn test_whitespace_separator_round_trips() {
        let codec = codec();
        for separator in ["   \n", "\t\n", "\r\n"] {
            let text = format!("[[Home]]\n{separator}body\n### Lightning Links\n[[a]]\n");
            let note = codec.parse("n.md", &text);

            assert_eq!(note.link_separator.as_deref(), Some(separator));
            assert_eq!(note.body, "body\n");
            assert_eq!(codec.serialize(&note), text);
        }

        let plain = codec.parse("n.md", "[[Home]]\n\nbody\n");
        assert_eq!(plain.link_separator, None);
    }

    #[test]
    fn test_section_stops_at_blank_line() {
        let text = "body\n### Lightning Links\n[[a]]\n\ntrailing text\n";
        let note = codec().parse("s.md", text);
        assert_eq!(note.body, "body\n");
        assert_eq!(note.related_section_raw.as_deref(), Some("[[a]]\n"));
        assert_eq!(note.related_notes, vec!["a.md"]);
    }

    #[test]
    fn test_marker_without_links() {
        let note = codec().parse("m.md", "body\n### Lightning Links\n");
        assert_eq!(note.related_section_raw.as_deref(), Some(""));
        assert!(note.related_notes.is_empty());
    }

    #[test]
    fn test_serialize_normalizes_missing_section() {
        let codec = codec();
        let note = codec.parse("n.md", "#tag\nbody\n");
        assert!(!note.has_related_section());
        assert_eq!(codec.serialize(&note), "#tag\nbody\n### Lightning Links\n");
    }

    #[test]
    fn test_serialize_terminates_unfinished_last_line() {
        let codec = codec();
        let note = codec.parse("n.md", "no newline");
        assert_eq!(codec.serialize(&note), "no newline\n### Lightning Links\n");
    }

    #[test]
    fn test_serialize_after_set_related() {
        let codec = codec();
        let mut note = codec.parse("n.md", "[[Home]]\n\nbody\n");
        note.set_related(
            vec!["science.md".to_string(), "money.md".to_string()],
            codec.formatter(),
            1,
        );
        assert_eq!(
            codec.serialize(&note),
            "[[Home]]\n\nbody\n### Lightning Links\n[[science]]\n"
        );
    }

    #[test]
    fn test_parse_file_reads_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("disk.md");
        std::fs::write(&path, FULL_NOTE).unwrap();

        let note = codec().parse_file(&path).unwrap();
        assert_eq!(note.path, path);
        assert_eq!(note.tags.len(), 2);
    }
}
