//! Completion-backed helpers over an opened vault
//!
//! Every operation is a short exchange with a [`CompletionProvider`]: the
//! assistant decides which notes to show the model and checks what comes
//! back against the roster. The wording of replies is the model's business.

use crate::error::{Result, VaultError};
use crate::index::VaultIndex;
use crate::traits::{CompletionProvider, CompletionRequest};
use crate::vault::write_note;
use lightning_config::RefreshConfig;
use lightning_parser::{Note, NoteCodec};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::{debug, info, warn};

const RECOMMEND_SYSTEM: &str = "You are a research assistant. Pick the single file from the \
provided list that is most relevant to the prompt and return its name exactly as listed.";

const ASK_SYSTEM: &str = "You are a research assistant. Answer the user's question using their \
research notes as the basis for the answer, and match the style of those notes.";

const SUGGEST_SYSTEM: &str = "You will be given a note, notes similar to it, and the names of \
every note in the vault. Suggest one topic that is close to the given notes but not yet covered \
by any note in the vault, and briefly explain why.";

const CREATE_SYSTEM: &str = "You will be given reference notes on a topic and the names of every \
note in the vault. Write a new note on the topic in the prompt, matching the style of the \
references. file_name is a short title; links are existing note names, one per line; tags are \
space separated; similar_notes lists existing notes related to the new one.";

const RECOMMEND_TEMPERATURE: f32 = 0.1;
const ASK_TEMPERATURE: f32 = 0.4;
const CREATIVE_TEMPERATURE: f32 = 0.5;

#[derive(Debug, Deserialize)]
struct FileNameReply {
    file_name: String,
}

/// A topic the vault does not cover yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub suggestion: String,
    pub reasoning: String,
}

#[derive(Debug, Deserialize)]
struct NewNoteReply {
    file_name: String,
    #[serde(default)]
    links: String,
    #[serde(default)]
    tags: String,
    body: String,
    #[serde(default)]
    similar_notes: Vec<String>,
}

/// Recommends, answers from and extends a vault through a completion service.
pub struct NoteAssistant<C: CompletionProvider> {
    completion: C,
    settings: RefreshConfig,
}

impl<C: CompletionProvider> NoteAssistant<C> {
    pub fn new(completion: C, settings: RefreshConfig) -> Self {
        Self {
            completion,
            settings,
        }
    }

    /// Roster note that best matches `prompt`, as its file name.
    pub async fn recommend(&self, vault: &VaultIndex, prompt: &str) -> Result<String> {
        let user = format!("{prompt}\n\n\nFiles:\n{}", note_list(vault));
        let request = CompletionRequest::new(RECOMMEND_SYSTEM, user, RECOMMEND_TEMPERATURE)
            .with_schema("FileName", file_name_schema());

        let reply: FileNameReply = self.structured(request).await?;
        let key = resolve_note(vault, &reply.file_name)?;
        info!(note = %key, "recommended note");
        Ok(key)
    }

    /// Free-text answer grounded in the recommended note and its similar notes.
    pub async fn ask(&self, vault: &VaultIndex, prompt: &str) -> Result<String> {
        let key = self.recommend(vault, prompt).await?;
        let references = self.references(vault, &key)?;
        let user = format!("{prompt}\n\n\nNotes:\n{references}");
        self.completion
            .complete(CompletionRequest::new(ASK_SYSTEM, user, ASK_TEMPERATURE))
            .await
    }

    /// Topic suggestion around the note currently open in the editor.
    pub async fn suggest(&self, vault: &VaultIndex) -> Result<Suggestion> {
        let current = vault.current_note()?;
        let key = resolve_note(vault, &current)?;
        let references = self.references(vault, &key)?;
        let user = format!(
            "Similar notes:\n{references}\nAll available notes:\n{}",
            note_list(vault)
        );
        let request = CompletionRequest::new(SUGGEST_SYSTEM, user, CREATIVE_TEMPERATURE)
            .with_schema("Suggestion", suggestion_schema());
        self.structured(request).await
    }

    /// Write a new note on `prompt`; returns its path.
    ///
    /// Never overwrites an existing note.
    pub async fn create(&self, vault: &mut VaultIndex, prompt: &str) -> Result<PathBuf> {
        let key = self.recommend(vault, prompt).await?;
        let references = self.references(vault, &key)?;
        let user = format!(
            "{prompt}\nSimilar notes:\n{references}\nAll available notes:\n{}",
            note_list(vault)
        );
        let request = CompletionRequest::new(CREATE_SYSTEM, user, CREATIVE_TEMPERATURE)
            .with_schema("NewNote", new_note_schema());
        let reply: NewNoteReply = self.structured(request).await?;

        let dialect = vault.dialect().clone();
        let file_name = clean_note_name(&reply.file_name, &dialect.note_extension);
        let path = vault.root().join(&file_name);
        if path.exists() {
            return Err(VaultError::NoteExists(path));
        }

        let d = &dialect;
        let mut note = Note::new(&path);
        note.header_links = reply
            .links
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| {
                let target = l
                    .trim_start_matches(d.link_open.as_str())
                    .trim_end_matches(d.link_close.as_str());
                format!("{}{}{}\n", d.link_open, target, d.link_close)
            })
            .collect();
        let tags: Vec<String> = reply
            .tags
            .split_whitespace()
            .map(|t| {
                if t.starts_with(d.tag_marker.as_str()) {
                    t.to_string()
                } else {
                    format!("{}{}", d.tag_marker, t)
                }
            })
            .collect();
        if !tags.is_empty() {
            note.tags = vec![format!("{}\n", tags.join(" "))];
        }
        note.body = reply.body;
        if !note.body.is_empty() && !note.body.ends_with('\n') {
            note.body.push('\n');
        }
        note.related_notes = reply
            .similar_notes
            .iter()
            .filter_map(|name| resolve_note(&*vault, name).ok())
            .collect();

        let codec = NoteCodec::for_vault(dialect.clone(), vault.root());
        write_note(&codec, &mut note, self.settings.links_count)?;
        vault.rescan()?;
        info!(path = %path.display(), "created note");
        Ok(path)
    }

    /// The note plus up to `similar_count` of its persisted similar notes,
    /// rendered for a prompt.
    fn references(&self, vault: &VaultIndex, key: &str) -> Result<String> {
        let mut keys: Vec<String> = match vault.related(key) {
            Ok(related) => related
                .iter()
                .take(self.settings.similar_count)
                .cloned()
                .collect(),
            Err(e) if e.is_lookup_miss() => {
                warn!(note = %key, "note has no similar notes yet; run a refresh first");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        keys.push(key.to_string());

        let codec = NoteCodec::for_vault(vault.dialect().clone(), vault.root());
        let mut out = String::new();
        for k in keys {
            let Some(path) = vault.roster().path_for(&k) else {
                debug!(note = %k, "similar note no longer in the vault");
                continue;
            };
            let note = codec.parse_file(path).map_err(|e| VaultError::io(path, e))?;
            let _ = writeln!(out, "file_name: {k}");
            let links = note.header_link_targets(codec.formatter());
            let _ = writeln!(out, "links: {}", links.join(", "));
            let _ = writeln!(out, "tags: {}", note.tag_tokens().join(" "));
            let _ = writeln!(out, "body: {}", note.body);
        }
        Ok(out)
    }

    async fn structured<T: DeserializeOwned>(&self, request: CompletionRequest) -> Result<T> {
        let text = self.completion.complete(request).await?;
        serde_json::from_str(&text).map_err(|e| {
            VaultError::Completion(format!(
                "{} returned a malformed structured reply: {e}",
                self.completion.model_name()
            ))
        })
    }
}

fn note_list(vault: &VaultIndex) -> String {
    vault
        .roster()
        .note_names()
        .iter()
        .map(|n| format!("{n}\n"))
        .collect()
}

/// Map a model-provided note name onto the roster.
///
/// Brackets, directories and the extension are stripped; an exact match wins
/// over a case-insensitive one.
pub fn resolve_note(vault: &VaultIndex, raw: &str) -> Result<String> {
    let d = vault.dialect();
    let trimmed = raw
        .trim()
        .trim_start_matches(d.link_open.as_str())
        .trim_end_matches(d.link_close.as_str())
        .trim();
    let base = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);
    let name = base.strip_suffix(d.note_extension.as_str()).unwrap_or(base);

    let names = vault.roster().note_names();
    let index = names
        .iter()
        .position(|n| n == name)
        .or_else(|| names.iter().position(|n| n.eq_ignore_ascii_case(name)));

    index
        .and_then(|i| vault.roster().key(i))
        .ok_or_else(|| VaultError::UnknownNote(raw.to_string()))
}

/// File name for a generated note: `_` and `-` become spaces, extension added.
pub fn clean_note_name(raw: &str, extension: &str) -> String {
    let name: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            '_' | '-' | '/' | '\\' => ' ',
            c => c,
        })
        .collect();
    let name = name.trim();
    if name.ends_with(extension) {
        name.to_string()
    } else {
        format!("{name}{extension}")
    }
}

fn file_name_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": { "file_name": { "type": "string" } },
        "required": ["file_name"],
        "additionalProperties": false
    })
}

fn suggestion_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "suggestion": { "type": "string" },
            "reasoning": { "type": "string" }
        },
        "required": ["suggestion", "reasoning"],
        "additionalProperties": false
    })
}

fn new_note_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "file_name": { "type": "string" },
            "links": { "type": "string" },
            "tags": { "type": "string" },
            "body": { "type": "string" },
            "similar_notes": { "type": "array", "items": { "type": "string" } }
        },
        "required": ["file_name", "links", "tags", "body", "similar_notes"],
        "additionalProperties": false
    })
}
