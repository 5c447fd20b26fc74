//! Turnover CLI entry point.

use anyhow::{anyhow, Context};
use clap::Parser;

use turnover::cli::{self, Cli, Commands};
use turnover::domain::models::staff::{Actor, Role};
use turnover::infrastructure::{ConfigLoader, HttpStoreConfig, HttpTaskStore};
use turnover::services::HousekeepingEngine;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        cli::handle_error(err, json);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("failed to load configuration")?;
    cli::init_tracing(&config.logging);

    let role = Role::parse(&cli.role)
        .ok_or_else(|| anyhow!("unknown role '{}'; expected manager, front_desk, or housekeeper", cli.role))?;
    let actor = Actor::new(cli.actor, role);

    let store = HttpTaskStore::new(HttpStoreConfig::from(&config.api))
        .context("failed to build HTTP client")?;
    let engine = HousekeepingEngine::new(store, &config.cache);

    match cli.command {
        Commands::Tasks(args) => {
            cli::commands::tasks::execute(args, &engine, &actor, cli.json).await
        }
        Commands::Staff => cli::commands::reference::staff(&engine, cli.json).await,
        Commands::Rooms => cli::commands::reference::rooms(&engine, cli.json).await,
        Commands::Zones => cli::commands::reference::zones(&engine, cli.json).await,
    }
}
