//! End-to-end tests for the `lightning` binary against temporary vaults.
//!
//! Every invocation runs with `LIGHTNING_TEST_MODE` so the user's config file
//! is ignored, and with colours off so output can be matched literally.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

// ============================================================================
// Helper Functions
// ============================================================================

fn lightning(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lightning").unwrap();
    cmd.current_dir(workdir)
        .env("LIGHTNING_TEST_MODE", "1")
        .env("NO_COLOR", "1")
        .env_remove("LIGHTNING_VAULT_PATH")
        .env_remove("NUM_REFERENCE_NOTES")
        .env_remove("NUM_LIGHTNING_LINKS")
        .env_remove("EMBEDDING_URL")
        .env_remove("COMPLETION_URL")
        .env_remove("OPENAI_API_KEY")
        .env_remove("OPENAI_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn vault_with(notes: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, text) in notes {
        fs::write(dir.path().join(name), text).unwrap();
    }
    dir
}

fn write_index(vault: &Path, json: &str) {
    fs::create_dir_all(vault.join(".obsidian")).unwrap();
    fs::write(vault.join(".obsidian/similar_notes.json"), json).unwrap();
}

/// Two-dimensional embedding per input, keyed on a single word.
struct WordEmbeddings(&'static str);

impl Respond for WordEmbeddings {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap_or_default();
        let inputs = body["input"].as_array().cloned().unwrap_or_default();
        let data: Vec<serde_json::Value> = inputs
            .iter()
            .enumerate()
            .map(|(index, text)| {
                let hit = text.as_str().unwrap_or_default().contains(self.0);
                let embedding = if hit { vec![1.0, 0.0] } else { vec![0.0, 1.0] };
                serde_json::json!({ "embedding": embedding, "index": index })
            })
            .collect();
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": data }))
    }
}

// ============================================================================
// Config Commands
// ============================================================================

#[test]
fn test_config_init_creates_file() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("nested/config.toml");

    lightning(temp.path())
        .args(["config", "init"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config file at"));

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[refresh]"));
    assert!(content.contains("[embedding]"));
}

#[test]
fn test_config_init_keeps_existing_file_without_force() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("config.toml");
    fs::write(&config_path, "# mine\n").unwrap();

    lightning(temp.path())
        .args(["config", "init"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(&config_path).unwrap(), "# mine\n");

    lightning(temp.path())
        .args(["config", "init", "--force"])
        .arg(&config_path)
        .assert()
        .success();
    assert!(fs::read_to_string(&config_path).unwrap().contains("[vault]"));
}

#[test]
fn test_config_show_reflects_file_and_overrides() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("config.toml");
    fs::write(&config_path, "[refresh]\nsimilar_count = 7\nlinks_count = 2\n").unwrap();

    lightning(temp.path())
        .arg("--config")
        .arg(&config_path)
        .args(["--links-count", "4", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("similar_count = 7"))
        .stdout(predicate::str::contains("links_count = 4"));
}

#[test]
fn test_inconsistent_counts_are_rejected() {
    let vault = vault_with(&[("a.md", "alpha\n")]);

    lightning(vault.path())
        .arg("--vault")
        .arg(vault.path())
        .args(["--similar-count", "2", "--links-count", "5", "endings"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("links_count"));
}

// ============================================================================
// Vault Commands
// ============================================================================

#[test]
fn test_endings_adds_missing_blank_lines() {
    let vault = vault_with(&[
        ("a.md", "no newline"),
        ("b.md", "one newline\n"),
        ("c.md", "already\n\n"),
    ]);

    lightning(vault.path())
        .arg("--vault")
        .arg(vault.path())
        .arg("endings")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 of 3 notes"));

    assert_eq!(fs::read_to_string(vault.path().join("a.md")).unwrap(), "no newline\n\n");
    assert_eq!(fs::read_to_string(vault.path().join("b.md")).unwrap(), "one newline\n\n");
    assert_eq!(fs::read_to_string(vault.path().join("c.md")).unwrap(), "already\n\n");
}

#[test]
fn test_related_prints_persisted_list() {
    let vault = vault_with(&[("a.md", "x\n"), ("b.md", "y\n"), ("c.md", "z\n")]);
    write_index(
        vault.path(),
        r#"{ "a.md": ["c.md", "b.md"], "b.md": ["a.md", "c.md"], "c.md": ["a.md", "b.md"] }"#,
    );

    lightning(vault.path())
        .arg("--vault")
        .arg(vault.path())
        .args(["related", "a"])
        .assert()
        .success()
        .stdout("c.md\nb.md\n");
}

#[test]
fn test_related_unknown_note_fails() {
    let vault = vault_with(&[("a.md", "x\n")]);
    write_index(vault.path(), r#"{ "a.md": [] }"#);

    lightning(vault.path())
        .arg("--vault")
        .arg(vault.path())
        .args(["related", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No related notes recorded for 'nowhere'"));
}

#[test]
fn test_current_reads_workspace_file() {
    let vault = vault_with(&[("a.md", "x\n")]);
    fs::create_dir_all(vault.path().join(".obsidian")).unwrap();
    fs::write(
        vault.path().join(".obsidian/workspace.json"),
        r#"{ "lastOpenFiles": ["a.md", "b.md"] }"#,
    )
    .unwrap();

    lightning(vault.path())
        .arg("--vault")
        .arg(vault.path())
        .arg("current")
        .assert()
        .success()
        .stdout("a.md\n");
}

#[test]
fn test_missing_vault_fails() {
    let temp = TempDir::new().unwrap();

    lightning(temp.path())
        .arg("--vault")
        .arg(temp.path().join("absent"))
        .arg("endings")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open vault"));
}

// ============================================================================
// Collaborator-backed Commands
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_refresh_rewrites_sections_and_index() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(WordEmbeddings("circuit"))
        .mount(&server)
        .await;

    let vault = vault_with(&[
        ("ohm.md", "circuit law\n"),
        ("poem.md", "roses are red\n"),
        ("wire.md", "circuit wiring\n"),
    ]);
    let url = format!("{}/v1/embeddings", server.uri());
    let root = vault.path().to_path_buf();

    let assert = tokio::task::spawn_blocking(move || {
        lightning(&root)
            .arg("--vault")
            .arg(&root)
            .args(["--embedding-url", &url, "--similar-count", "2", "--links-count", "1"])
            .arg("refresh")
            .assert()
    })
    .await
    .unwrap();
    assert
        .success()
        .stdout(predicate::str::contains("3 notes, 3 sections updated"));

    let ohm = fs::read_to_string(vault.path().join("ohm.md")).unwrap();
    assert_eq!(ohm, "circuit law\n\n### Lightning Links\n[[wire]]\n");

    let index: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(vault.path().join(".obsidian/similar_notes.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(index["wire.md"][0], "ohm.md");
    assert_eq!(index["ohm.md"].as_array().unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_recommend_uses_completion_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "{\"file_name\": \"Wire\"}" },
                "finish_reason": "stop"
            }]
        })))
        .mount(&server)
        .await;

    let vault = vault_with(&[("ohm.md", "x\n"), ("wire.md", "y\n")]);
    let root = vault.path().to_path_buf();
    let completion_url = format!("{}/v1", server.uri());

    let assert = tokio::task::spawn_blocking(move || {
        lightning(&root)
            .env("COMPLETION_URL", &completion_url)
            .arg("--vault")
            .arg(&root)
            .args(["recommend", "how are wires made"])
            .assert()
    })
    .await
    .unwrap();
    assert.success().stdout("wire.md\n");
}

#[test]
fn test_hosted_completion_without_key_fails() {
    let vault = vault_with(&[("a.md", "x\n")]);

    lightning(vault.path())
        .arg("--vault")
        .arg(vault.path())
        .args(["ask", "anything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to create completion provider"));
}
