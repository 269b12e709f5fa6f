//! Account index management with atomic operations.

use std::fs;
use std::path::Path;
use std::sync::{LazyLock, Mutex};

use quotadeck_types::{AccountIndex, RepositoryError};

use super::paths::ACCOUNTS_INDEX;

/// Global lock for account file read-modify-write to prevent concurrent corruption.
pub static ACCOUNT_FILE_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Load the account index file. A missing index is an empty index.
pub fn load_account_index(data_dir: &Path) -> Result<AccountIndex, RepositoryError> {
    let index_path = data_dir.join(ACCOUNTS_INDEX);

    if !index_path.exists() {
        tracing::debug!("Account index file does not exist");
        return Ok(AccountIndex::new());
    }

    let content = fs::read_to_string(&index_path).map_err(|e| RepositoryError::Storage {
        message: format!("failed to read account index: {e}"),
    })?;

    let index: AccountIndex =
        serde_json::from_str(&content).map_err(|e| RepositoryError::from_json_error(&e))?;

    tracing::debug!("Loaded index with {} accounts", index.accounts.len());
    Ok(index)
}

/// Save the account index file atomically.
pub fn save_account_index(data_dir: &Path, index: &AccountIndex) -> Result<(), RepositoryError> {
    let index_path = data_dir.join(ACCOUNTS_INDEX);
    let temp_path = data_dir.join(format!("{}.tmp", ACCOUNTS_INDEX));

    let content =
        serde_json::to_string_pretty(index).map_err(|e| RepositoryError::from_json_error(&e))?;

    fs::write(&temp_path, content).map_err(|e| RepositoryError::Storage {
        message: format!("failed to write temp index file: {e}"),
    })?;

    fs::rename(&temp_path, &index_path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        RepositoryError::Storage { message: format!("failed to replace index file: {e}") }
    })
}
