//! QuotaDeck CLI
//!
//! Prints per-model quota for stored accounts and runs model discovery for
//! custom providers. Data lives under `~/.quotadeck` (override with
//! `QUOTADECK_DATA_DIR`).

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod account_commands;
mod cli;
mod commands;
mod config_commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level)
        .with_context(|| format!("invalid log level '{}'", cli.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Account(cmd) => commands::handle_account_command(cmd).await,
        Commands::Config(cmd) => commands::handle_config_command(cmd),
    }
}
