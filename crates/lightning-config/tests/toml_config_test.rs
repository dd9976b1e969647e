//! TOML loading tests for the full configuration tree

use lightning_config::{DialectConfig, LightningConfig, RefreshConfig};
use std::path::{Path, PathBuf};

#[test]
fn test_full_config_file() {
    let contents = r####"
[vault]
path = "/notes"

[refresh]
similar_count = 6
links_count = 2

[dialect]
section_marker = "## Related"
link_padding = "  "

[embedding]
url = "http://embed.local/v1/embeddings"
model = "bge-small"
dimensions = 384

[completion]
model = "local-chat"
"####;

    let config = LightningConfig::from_toml_str(contents, Path::new("config.toml")).unwrap();
    assert_eq!(config.vault.path, PathBuf::from("/notes"));
    assert_eq!(
        config.refresh,
        RefreshConfig {
            similar_count: 6,
            links_count: 2
        }
    );
    assert_eq!(config.dialect.section_marker, "## Related");
    assert_eq!(config.dialect.link_padding, "  ");
    assert_eq!(config.dialect.note_extension, ".md");
    assert_eq!(config.embedding.dimensions, Some(384));
    assert_eq!(config.embedding.batch_size, 32);
    assert_eq!(config.completion.model, "local-chat");
    assert_eq!(config.completion.url, "https://api.openai.com/v1");
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_file_is_all_defaults() {
    let config = LightningConfig::from_toml_str("", Path::new("empty.toml")).unwrap();
    assert_eq!(config.refresh, RefreshConfig::default());
    assert_eq!(config.dialect, DialectConfig::default());
}

#[test]
fn test_effective_config_survives_toml_round_trip() {
    let mut config = LightningConfig::default();
    config.vault.path = PathBuf::from("/vault");
    config.refresh.links_count = 5;
    config.embedding.api_key = Some("secret".to_string());

    let rendered = config.to_toml().unwrap();
    let reparsed = LightningConfig::from_toml_str(&rendered, Path::new("rendered.toml")).unwrap();
    assert_eq!(reparsed, config);
}
