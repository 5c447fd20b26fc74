//! Command-line interface over the housekeeping engine.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::domain::models::config::LoggingConfig;

#[derive(Parser)]
#[command(
    name = "turnover",
    version,
    about = "Housekeeping task lifecycle and assignment engine"
)]
pub struct Cli {
    /// Emit machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Role to act as: manager, front_desk, or housekeeper
    #[arg(long, global = true, default_value = "manager")]
    pub role: String,

    /// Acting user id (used for housekeeper ownership checks)
    #[arg(long, global = true, default_value_t = 0)]
    pub actor: i64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect and mutate cleaning tasks
    Tasks(commands::tasks::TasksArgs),
    /// List housekeeping staff
    Staff,
    /// List rooms
    Rooms,
    /// List zones
    Zones,
}

/// Initialize tracing to stderr with the configured level and format.
/// `RUST_LOG` takes precedence over the config file level.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    if config.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Print an error in the requested format and exit non-zero.
pub fn handle_error(err: anyhow::Error, json: bool) -> ! {
    if json {
        let body = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!("{body}");
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
