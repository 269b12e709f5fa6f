//! Account file storage operations.

use std::fs;
use std::path::{Path, PathBuf};

use quotadeck_types::{Account, AccountSummary, RepositoryError};

use super::index::{load_account_index, save_account_index, ACCOUNT_FILE_LOCK};
use super::paths::get_accounts_dir;

fn lock_poisoned() -> RepositoryError {
    RepositoryError::Storage { message: "account file lock poisoned".to_string() }
}

/// Resolve `<accounts_dir>/<id>.json`, refusing ids that would escape the
/// accounts directory.
fn account_file(
    data_dir: &Path,
    account_id: &str,
    suffix: &str,
) -> Result<PathBuf, RepositoryError> {
    let is_plain = !account_id.is_empty()
        && !account_id.contains(['/', '\\'])
        && !account_id.contains("..");
    if !is_plain {
        return Err(RepositoryError::InvalidId { id: account_id.to_string() });
    }
    Ok(get_accounts_dir(data_dir)?.join(format!("{account_id}{suffix}")))
}

/// Load a single account by ID.
pub fn load_account(data_dir: &Path, account_id: &str) -> Result<Account, RepositoryError> {
    let account_path = account_file(data_dir, account_id, ".json")?;

    if !account_path.exists() {
        return Err(RepositoryError::NotFound { id: account_id.to_string() });
    }

    let content = fs::read_to_string(&account_path).map_err(|e| RepositoryError::Storage {
        message: format!("failed to read account data: {e}"),
    })?;

    serde_json::from_str(&content).map_err(|e| RepositoryError::from_json_error(&e))
}

/// Save a single account atomically.
pub fn save_account(data_dir: &Path, account: &Account) -> Result<(), RepositoryError> {
    let account_path = account_file(data_dir, &account.id, ".json")?;
    let temp_path = account_file(data_dir, &account.id, ".json.tmp")?;

    let content =
        serde_json::to_string_pretty(account).map_err(|e| RepositoryError::from_json_error(&e))?;

    if let Err(e) = fs::write(&temp_path, content) {
        let _ = fs::remove_file(&temp_path);
        return Err(RepositoryError::Storage {
            message: format!("failed to write temp account file: {e}"),
        });
    }

    fs::rename(&temp_path, &account_path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        RepositoryError::Storage { message: format!("failed to replace account file: {e}") }
    })
}

/// Save an account and make sure the index lists it.
pub fn upsert_account(data_dir: &Path, account: &Account) -> Result<(), RepositoryError> {
    let _lock = ACCOUNT_FILE_LOCK.lock().map_err(|_| lock_poisoned())?;

    save_account(data_dir, account)?;

    let mut index = load_account_index(data_dir)?;
    match index.accounts.iter_mut().find(|s| s.id == account.id) {
        Some(summary) => *summary = AccountSummary::from(account),
        None => index.accounts.push(AccountSummary::from(account)),
    }
    save_account_index(data_dir, &index)
}

/// Replace the supported model list of one account.
pub fn update_account_models(
    data_dir: &Path,
    account_id: &str,
    models: Vec<String>,
) -> Result<(), RepositoryError> {
    let _lock = ACCOUNT_FILE_LOCK.lock().map_err(|_| lock_poisoned())?;

    let mut account = load_account(data_dir, account_id)?;
    account.set_supported_models(models);
    save_account(data_dir, &account)
}

/// List all indexed accounts, skipping entries whose file is missing or corrupt.
pub fn list_accounts(data_dir: &Path) -> Result<Vec<Account>, RepositoryError> {
    let index = load_account_index(data_dir)?;
    let mut accounts = Vec::with_capacity(index.accounts.len());

    for summary in &index.accounts {
        match load_account(data_dir, &summary.id) {
            Ok(account) => accounts.push(account),
            Err(e) => {
                tracing::warn!("Skipping account {} ({}): {}", summary.id, summary.email, e);
            },
        }
    }

    Ok(accounts)
}
