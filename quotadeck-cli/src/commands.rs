use anyhow::Result;

use crate::cli::{AccountCommands, ConfigCommands};
use crate::{account_commands, config_commands};

pub async fn handle_account_command(cmd: AccountCommands) -> Result<()> {
    match cmd {
        AccountCommands::List { json } => account_commands::list_accounts(json).await,
        AccountCommands::Show { identifier, query, json } => {
            account_commands::show_account(&identifier, &query, json).await
        },
        AccountCommands::Discover { identifier } => {
            account_commands::discover_models(&identifier).await
        },
    }
}

pub fn handle_config_command(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show { json } => config_commands::show_config(json),
    }
}
