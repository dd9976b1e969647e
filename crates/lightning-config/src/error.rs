//! Error types for configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading or writing a config file failed.
    #[error("IO error on {path}: {source}")]
    Io {
        /// File that was being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::LightningConfig`].
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: toml::de::Error,
    },

    /// Serializing the config back to TOML failed.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value from the file or environment is out of range or unparsable.
    #[error("Invalid value for {key}: {value}")]
    InvalidValue {
        /// Setting name (env var or dotted TOML key).
        key: String,
        /// Offending value.
        value: String,
    },

    /// The platform config directory could not be determined.
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
