//! Broadcast of the latest account list.
//!
//! `fetch_accounts` re-reads the repository and publishes the result to all
//! subscribers, which is how views observe a snapshot updated by discovery.

use std::sync::Arc;

use quotadeck_types::Account;
use tokio::sync::watch;

use super::repository::{AccountRepository, RepoResult};

#[derive(Clone)]
pub struct AccountFeed {
    repository: Arc<dyn AccountRepository>,
    sender: Arc<watch::Sender<Arc<Vec<Account>>>>,
}

impl AccountFeed {
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        let (sender, _) = watch::channel(Arc::new(Vec::new()));
        Self { repository, sender: Arc::new(sender) }
    }

    /// Re-list accounts from the repository and publish them.
    pub async fn fetch_accounts(&self) -> RepoResult<()> {
        let accounts = self.repository.list_accounts().await?;
        tracing::debug!("Publishing {} accounts", accounts.len());
        self.sender.send_replace(Arc::new(accounts));
        Ok(())
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Account>>> {
        self.sender.subscribe()
    }

    /// Last published list.
    pub fn snapshot(&self) -> Arc<Vec<Account>> {
        self.sender.borrow().clone()
    }

    /// Last published snapshot of one account.
    pub fn account(&self, id: &str) -> Option<Account> {
        self.sender.borrow().iter().find(|a| a.id == id).cloned()
    }
}

impl std::fmt::Debug for AccountFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountFeed").field("accounts", &self.sender.borrow().len()).finish()
    }
}
