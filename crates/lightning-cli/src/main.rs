use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use lightning_cli::{
    cli::{Cli, Commands, ConfigCommands},
    commands,
};
use lightning_config::{ConfigOverrides, LightningConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing .env is the normal case
    let dotenv = dotenvy::dotenv().ok();

    // Logs go to stderr so command output stays pipeable; RUST_LOG still wins
    let env_filter = EnvFilter::builder()
        .with_default_directive(cli.level_filter().into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = dotenv {
        debug!(path = %path.display(), "loaded environment file");
    }

    // Writing a config file must work even when the current one is broken
    if let Commands::Config(ConfigCommands::Init { path, force }) = &cli.command {
        let init = ConfigCommands::Init {
            path: path.clone(),
            force: *force,
        };
        return commands::config::execute(init, None);
    }

    let overrides = ConfigOverrides {
        vault_path: cli.vault,
        similar_count: cli.similar_count,
        links_count: cli.links_count,
        embedding_url: cli.embedding_url,
        embedding_model: cli.embedding_model,
    };
    let config = LightningConfig::load(cli.config, overrides)?;
    debug!(vault = %config.vault.path.display(), "configuration loaded");

    match cli.command {
        Commands::Refresh => commands::refresh::execute(config).await?,
        Commands::Endings => commands::vault::endings(config)?,
        Commands::Related { note } => commands::vault::related(config, &note)?,
        Commands::Current => commands::vault::current(config)?,
        Commands::Recommend { prompt } => commands::assistant::recommend(config, &prompt).await?,
        Commands::Ask { prompt } => commands::assistant::ask(config, &prompt).await?,
        Commands::Suggest { create } => commands::assistant::suggest(config, create).await?,
        Commands::Create { prompt } => commands::assistant::create(config, &prompt).await?,
        Commands::Config(cmd) => commands::config::execute(cmd, Some(&config))?,
    }

    Ok(())
}
