//! JSON file account storage.
//!
//! Layout under the data directory:
//!
//! ```text
//! <data_dir>/
//! ├── accounts.json        # AccountIndex
//! └── accounts/<id>.json   # one Account per file
//! ```

mod index;
mod paths;
mod storage;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quotadeck_types::{Account, RepositoryError};

pub use index::{load_account_index, save_account_index};
pub use paths::{get_accounts_dir, get_data_dir, DATA_DIR_ENV};
pub use storage::{list_accounts, load_account, save_account, upsert_account};

use super::repository::{AccountRepository, RepoResult};

/// Account repository backed by JSON files in a data directory.
#[derive(Debug, Clone)]
pub struct FileAccountRepository {
    data_dir: PathBuf,
}

impl FileAccountRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    /// Repository rooted at the default data directory.
    pub fn from_default_dir() -> Result<Self, quotadeck_types::ConfigError> {
        get_data_dir().map(Self::new)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Add or replace an account, keeping the index in sync.
    pub async fn upsert_account(&self, account: Account) -> RepoResult<()> {
        let dir = self.data_dir.clone();
        run_blocking(move || storage::upsert_account(&dir, &account)).await
    }
}

async fn run_blocking<T, F>(f: F) -> RepoResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> RepoResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| RepositoryError::Storage { message: format!("task join error: {e}") })?
}

#[async_trait]
impl AccountRepository for FileAccountRepository {
    async fn list_accounts(&self) -> RepoResult<Vec<Account>> {
        let dir = self.data_dir.clone();
        run_blocking(move || storage::list_accounts(&dir)).await
    }

    async fn get_account(&self, id: &str) -> RepoResult<Account> {
        let dir = self.data_dir.clone();
        let id = id.to_string();
        run_blocking(move || storage::load_account(&dir, &id)).await
    }

    async fn update_account_models(&self, account_id: &str, models: Vec<String>) -> RepoResult<()> {
        let dir = self.data_dir.clone();
        let account_id = account_id.to_string();
        run_blocking(move || storage::update_account_models(&dir, &account_id, models)).await
    }
}
