//! Lightning Links note dialect
//!
//! A note is a plain-text markdown file with, in order:
//! - an optional metadata block between two `---` lines (kept verbatim, never interpreted)
//! - an optional block of header links, one `[[note]]` per line, followed by a blank line
//! - an optional block of tag lines (`#tag`, headings excluded)
//! - the body
//! - an optional trailing related-notes section: `### Lightning Links` and one line of links
//!
//! This crate provides:
//! - [`NoteCodec`]: single-pass line scanner and its exact inverse
//! - [`LinkFormatter`]: the inline `[[a]]     [[b]]` notation of the related-notes line
//! - [`Note`]: the parsed fields

pub mod codec;
pub mod links;
pub mod types;

pub use codec::NoteCodec;
pub use links::LinkFormatter;
pub use types::Note;

pub use lightning_config::DialectConfig;
