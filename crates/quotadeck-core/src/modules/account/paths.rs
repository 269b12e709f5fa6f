//! Path utilities for account data storage.

use std::fs;
use std::path::{Path, PathBuf};

use quotadeck_types::{ConfigError, RepositoryError};

/// Directory name for data storage.
pub const DATA_DIR: &str = ".quotadeck";
/// Filename for the account index.
pub const ACCOUNTS_INDEX: &str = "accounts.json";
/// Directory name for individual account files.
pub const ACCOUNTS_DIR: &str = "accounts";
/// Environment override for the data directory.
pub const DATA_DIR_ENV: &str = "QUOTADECK_DATA_DIR";

/// Get the data directory path.
///
/// Priority:
/// 1. `QUOTADECK_DATA_DIR` environment variable (for container deployments)
/// 2. `~/.quotadeck` (default for desktop usage)
pub fn get_data_dir() -> Result<PathBuf, ConfigError> {
    let data_dir = match std::env::var(DATA_DIR_ENV) {
        Ok(custom_dir) if !custom_dir.trim().is_empty() => PathBuf::from(custom_dir),
        _ => {
            let home = dirs::home_dir().ok_or_else(|| ConfigError::DirectoryUnavailable {
                message: "cannot determine home directory".to_string(),
            })?;
            home.join(DATA_DIR)
        },
    };

    if !data_dir.exists() {
        fs::create_dir_all(&data_dir).map_err(|e| ConfigError::DirectoryUnavailable {
            message: format!("failed to create {}: {e}", data_dir.display()),
        })?;
    }

    Ok(data_dir)
}

/// Get the accounts directory path under `data_dir`, creating it on demand.
pub fn get_accounts_dir(data_dir: &Path) -> Result<PathBuf, RepositoryError> {
    let accounts_dir = data_dir.join(ACCOUNTS_DIR);

    if !accounts_dir.exists() {
        fs::create_dir_all(&accounts_dir).map_err(|e| RepositoryError::Storage {
            message: format!("failed to create accounts directory: {e}"),
        })?;
    }

    Ok(accounts_dir)
}
