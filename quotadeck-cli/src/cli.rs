use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "quotadeck",
    about = "QuotaDeck - account quota and model discovery",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(subcommand, about = "Inspect accounts and discover their models")]
    Account(AccountCommands),

    #[command(subcommand, about = "View configuration")]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum AccountCommands {
    #[command(about = "List all accounts with quota status")]
    List {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Show quota rows and supported models for one account")]
    Show {
        #[arg(help = "Email or account ID")]
        identifier: String,

        #[arg(short, long, default_value = "", help = "Filter supported models (case-insensitive)")]
        query: String,

        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Discover the models a custom provider account serves")]
    Discover {
        #[arg(help = "Email or account ID")]
        identifier: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    #[command(about = "Show current configuration")]
    Show {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },
}
