//! Account repository trait for storage abstraction.

use async_trait::async_trait;
use quotadeck_types::{Account, RepositoryError};

pub type RepoResult<T> = Result<T, RepositoryError>;

/// Owner of the persisted account list.
///
/// Implementations must tolerate concurrent callers; last write wins is
/// acceptable because callers never read-modify-write through this trait.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn list_accounts(&self) -> RepoResult<Vec<Account>>;
    async fn get_account(&self, id: &str) -> RepoResult<Account>;
    /// Replace the account's supported models with `models`.
    async fn update_account_models(&self, account_id: &str, models: Vec<String>) -> RepoResult<()>;
}

/// Resolve an account by id or email.
pub async fn find_account(
    repo: &dyn AccountRepository,
    identifier: &str,
) -> RepoResult<Account> {
    repo.list_accounts()
        .await?
        .into_iter()
        .find(|a| a.matches_identifier(identifier))
        .ok_or_else(|| RepositoryError::NotFound { id: identifier.to_string() })
}
