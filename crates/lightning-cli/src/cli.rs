use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Parser)]
#[command(name = "lightning")]
#[command(about = "lightning - keep the Lightning Links of a markdown vault in sync")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace); defaults to 'warn'
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to ~/.config/lightning/config.toml)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Vault directory (overrides config file)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Ranked similar notes kept per note (overrides config file)
    #[arg(long, global = true)]
    pub similar_count: Option<usize>,

    /// Links displayed per note (overrides config file)
    #[arg(long, global = true)]
    pub links_count: Option<usize>,

    /// Embedding service URL (overrides config file)
    #[arg(long, global = true)]
    pub embedding_url: Option<String>,

    /// Embedding model name (overrides config file)
    #[arg(long, global = true)]
    pub embedding_model: Option<String>,
}

impl Cli {
    /// Effective console log level.
    pub fn level_filter(&self) -> LevelFilter {
        match (self.log_level, self.verbose) {
            (Some(level), _) => level.into(),
            (None, true) => LevelFilter::DEBUG,
            (None, false) => LevelFilter::WARN,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recompute similarity and rewrite every note's Lightning Links
    Refresh,

    /// Make sure every note ends with a blank line before its section
    Endings,

    /// Show the persisted related notes of a note
    Related {
        /// Note name, with or without extension
        note: String,
    },

    /// Show the note most recently opened in the editor
    Current,

    /// Name the note that best matches a prompt
    Recommend {
        /// What you are looking for
        prompt: String,
    },

    /// Answer a question from the most relevant notes
    Ask {
        /// The question
        prompt: String,
    },

    /// Suggest a topic near the current note that the vault does not cover
    Suggest {
        /// Also write a note on the suggested topic
        #[arg(long)]
        create: bool,
    },

    /// Write a new note on a topic
    Create {
        /// Topic of the new note
        prompt: String,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write an example config file
    Init {
        /// Destination (defaults to ~/.config/lightning/config.toml)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective configuration as TOML
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "lightning",
            "refresh",
            "--vault",
            "/tmp/notes",
            "--links-count",
            "2",
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::Refresh));
        assert_eq!(cli.vault, Some(PathBuf::from("/tmp/notes")));
        assert_eq!(cli.links_count, Some(2));
    }

    #[test]
    fn test_level_filter_precedence() {
        let quiet = Cli::try_parse_from(["lightning", "current"]).unwrap();
        assert_eq!(quiet.level_filter(), LevelFilter::WARN);

        let verbose = Cli::try_parse_from(["lightning", "-v", "current"]).unwrap();
        assert_eq!(verbose.level_filter(), LevelFilter::DEBUG);

        let explicit = Cli::try_parse_from(["lightning", "-v", "-l", "trace", "current"]).unwrap();
        assert_eq!(explicit.level_filter(), LevelFilter::TRACE);
    }

    #[test]
    fn test_config_init_positional_path() {
        let cli = Cli::try_parse_from(["lightning", "config", "init", "out.toml", "--force"]).unwrap();
        match cli.command {
            Commands::Config(ConfigCommands::Init { path, force }) => {
                assert_eq!(path, Some(PathBuf::from("out.toml")));
                assert!(force);
            }
            _ => panic!("expected config init"),
        }
    }
}
