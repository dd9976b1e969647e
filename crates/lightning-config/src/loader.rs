//! Layered configuration loading: defaults < file < environment < overrides

use crate::components::{CompletionConfig, DialectConfig, EmbeddingConfig, RefreshConfig};
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Vault location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Directory holding the notes
    pub path: PathBuf,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            path: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

/// Complete configuration for one vault.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightningConfig {
    /// Vault location
    #[serde(default)]
    pub vault: VaultConfig,
    /// Ranked and displayed counts
    #[serde(default)]
    pub refresh: RefreshConfig,
    /// Dialect tokens
    #[serde(default)]
    pub dialect: DialectConfig,
    /// Embedding collaborator
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    /// Completion collaborator
    #[serde(default)]
    pub completion: CompletionConfig,
}

/// Values supplied on the command line; highest precedence.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Vault directory
    pub vault_path: Option<PathBuf>,
    /// Ranked similar notes per note
    pub similar_count: Option<usize>,
    /// Displayed related links per note
    pub links_count: Option<usize>,
    /// Embedding endpoint
    pub embedding_url: Option<String>,
    /// Embedding model
    pub embedding_model: Option<String>,
}

impl LightningConfig {
    /// Load configuration with precedence: defaults < file < env < overrides
    pub fn load(config_file: Option<PathBuf>, overrides: ConfigOverrides) -> ConfigResult<Self> {
        let mut config = Self::from_file_or_default(config_file)?;
        config.apply_env()?;
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Parse a config from TOML text.
    pub fn from_toml_str(contents: &str, origin: &Path) -> ConfigResult<Self> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Default config file location (`<config dir>/lightning/config.toml`)
    pub fn default_config_path() -> ConfigResult<PathBuf> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("lightning").join("config.toml"))
    }

    /// Serialize the effective configuration as TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject combinations the refresh cycle cannot honour.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.refresh.is_consistent() {
            return Err(ConfigError::InvalidValue {
                key: "refresh.links_count".to_string(),
                value: format!(
                    "{} exceeds refresh.similar_count {}",
                    self.refresh.links_count, self.refresh.similar_count
                ),
            });
        }
        if self.embedding.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "embedding.batch_size".to_string(),
                value: "0".to_string(),
            });
        }
        if self.dialect.section_marker.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "dialect.section_marker".to_string(),
                value: self.dialect.section_marker.clone(),
            });
        }
        Ok(())
    }

    /// Write an example config file, creating parent directories.
    pub fn create_example(path: &Path) -> ConfigResult<()> {
        let example = r####"# Lightning Links Configuration
# Location: ~/.config/lightning/config.toml

[vault]
# Directory holding your notes
path = "/home/user/Documents/my-vault"

[refresh]
# Ranked similar notes kept per note in <vault>/.obsidian/similar_notes.json
similar_count = 10
# Links written under "### Lightning Links"
links_count = 3

[embedding]
# Any OpenAI-compatible /v1/embeddings endpoint (Ollama, OpenAI, LiteLLM, ...)
url = "http://localhost:11434/v1/embeddings"
model = "nomic-embed-text"
# api_key = "sk-..."
batch_size = 32
timeout_secs = 60

[completion]
url = "https://api.openai.com/v1"
model = "gpt-4o-mini"
# api_key = "sk-..."   (or OPENAI_API_KEY)
timeout_secs = 60
"####;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, example).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_file_or_default(config_file: Option<PathBuf>) -> ConfigResult<Self> {
        // Explicit files are always honoured; the user file is skipped in test mode
        let path = match config_file {
            Some(path) => Some(path),
            None if std::env::var("LIGHTNING_TEST_MODE").is_ok() => None,
            None => Self::default_config_path().ok().filter(|p| p.exists()),
        };

        let Some(path) = path else {
            return Ok(Self::default());
        };

        debug!(path = %path.display(), "loading config file");
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_toml_str(&contents, &path)
    }

    fn apply_env(&mut self) -> ConfigResult<()> {
        if let Ok(path) = std::env::var("LIGHTNING_VAULT_PATH") {
            self.vault.path = PathBuf::from(path);
        }
        if let Some(count) = env_parsed::<usize>("NUM_REFERENCE_NOTES")? {
            self.refresh.similar_count = count;
        }
        if let Some(count) = env_parsed::<usize>("NUM_LIGHTNING_LINKS")? {
            self.refresh.links_count = count;
        }

        if let Ok(url) = std::env::var("EMBEDDING_URL") {
            self.embedding.url = url;
        }
        if let Ok(model) = std::env::var("EMBEDDING_MODEL") {
            self.embedding.model = model;
        }
        if let Ok(key) = std::env::var("EMBEDDING_API_KEY") {
            self.embedding.api_key = Some(key).filter(|k| !k.is_empty());
        }
        if let Some(dimensions) = env_parsed::<usize>("EMBEDDING_DIMENSIONS")? {
            self.embedding.dimensions = Some(dimensions);
        }

        if let Ok(url) = std::env::var("COMPLETION_URL") {
            self.completion.url = url;
        }
        if let Ok(model) = std::env::var("COMPLETION_MODEL") {
            self.completion.model = model;
        }
        if self.completion.api_key.is_none() {
            self.completion.api_key = std::env::var("OPENAI_API_KEY")
                .or_else(|_| std::env::var("OPENAI_KEY"))
                .ok()
                .filter(|k| !k.is_empty());
        }
        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(path) = overrides.vault_path {
            self.vault.path = path;
        }
        if let Some(count) = overrides.similar_count {
            self.refresh.similar_count = count;
        }
        if let Some(count) = overrides.links_count {
            self.refresh.links_count = count;
        }
        if let Some(url) = overrides.embedding_url {
            self.embedding.url = url;
        }
        if let Some(model) = overrides.embedding_model {
            self.embedding.model = model;
        }
    }
}

fn env_parsed<T: FromStr>(key: &str) -> ConfigResult<Option<T>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            }),
        Err(_) => Ok(None),
    }
}
