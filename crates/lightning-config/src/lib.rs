//! # Lightning Links Configuration
//!
//! Type-safe configuration for the Lightning Links workspace.
//!
//! The most important piece is [`DialectConfig`]: the single immutable record of
//! every literal token the note dialect uses (metadata delimiter, link brackets,
//! tag marker, section marker, extensions). The parser and the formatter both
//! read their tokens from the same record, so what is parsed is exactly what is
//! written.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lightning_config::{ConfigOverrides, LightningConfig};
//!
//! let config = LightningConfig::load(None, ConfigOverrides::default())?;
//! println!("vault: {}", config.vault.path.display());
//! # Ok::<(), lightning_config::ConfigError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod components;
mod error;
mod loader;

pub use components::*;
pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigOverrides, LightningConfig, VaultConfig};
