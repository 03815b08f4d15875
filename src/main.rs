mod cli;
mod config;
mod error;
mod linker;
mod model;
mod providers;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use linker::Linker;
use model::trigger::TriggerContext;
use providers::trello::TrelloClient;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse().with_action_inputs(|name| std::env::var(name).ok());

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Everything required is validated before the first request
    let config = config::load_config(&cli)?;
    let ctx = TriggerContext::new(cli.git_ref.clone(), &cli.repository, cli.server_url.clone())?;
    tracing::debug!(?config, "Configuration loaded");

    let client = TrelloClient::new(&config);
    let outcome = Linker::new(&client, &config.board_id).run(&ctx).await?;
    tracing::info!(%outcome, "Run finished");

    Ok(())
}
