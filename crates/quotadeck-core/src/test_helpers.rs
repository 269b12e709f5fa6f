//! In-memory doubles for discovery and storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use quotadeck_types::{
    Account, DiscoveryError, ProviderKind, RepositoryError, TokenData, UpstreamProxyConfig,
};
use tokio::sync::Notify;

use crate::modules::discovery::ModelDiscovery;
use crate::modules::repository::{AccountRepository, RepoResult};

pub fn custom_account(id: &str) -> Account {
    let mut account =
        Account::new(id.to_string(), format!("{id}@example.com"), TokenData::api_key("sk-test"));
    account.provider = ProviderKind::Custom;
    account.base_url = Some("https://llm.example.com".to_string());
    account
}

pub fn antigravity_account(id: &str) -> Account {
    Account::new(id.to_string(), format!("{id}@example.com"), TokenData::api_key("rt"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryCall {
    pub base_url: String,
    pub refresh_token: String,
    pub proxy: UpstreamProxyConfig,
    pub timeout_secs: u64,
}

pub enum StubBehavior {
    Models(Vec<String>),
    Fail(DiscoveryError),
    /// Sleep past the requested timeout, then report it.
    Hang,
}

/// Discovery double. When `gate` is set, each call waits on it before
/// answering so tests can observe the in-flight state.
pub struct StubDiscovery {
    behavior: StubBehavior,
    pub gate: Option<Arc<Notify>>,
    pub started: Arc<Notify>,
    pub calls: AtomicUsize,
    pub last_call: Mutex<Option<DiscoveryCall>>,
}

impl StubDiscovery {
    pub fn new(behavior: StubBehavior) -> Self {
        Self {
            behavior,
            gate: None,
            started: Arc::new(Notify::new()),
            calls: AtomicUsize::new(0),
            last_call: Mutex::new(None),
        }
    }

    pub fn returning(models: &[&str]) -> Self {
        Self::new(StubBehavior::Models(models.iter().map(|m| m.to_string()).collect()))
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelDiscovery for StubDiscovery {
    async fn discover_models(
        &self,
        base_url: &str,
        refresh_token: &str,
        proxy: &UpstreamProxyConfig,
        timeout_secs: u64,
    ) -> Result<Vec<String>, DiscoveryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_call.lock().unwrap() = Some(DiscoveryCall {
            base_url: base_url.to_string(),
            refresh_token: refresh_token.to_string(),
            proxy: proxy.clone(),
            timeout_secs,
        });
        self.started.notify_one();

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match &self.behavior {
            StubBehavior::Models(models) => Ok(models.clone()),
            StubBehavior::Fail(err) => Err(err.clone()),
            StubBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(timeout_secs)).await;
                Err(DiscoveryError::Timeout { secs: timeout_secs })
            },
        }
    }
}

/// Repository double backed by a vector of accounts.
#[derive(Default)]
pub struct MemoryRepository {
    pub accounts: Mutex<Vec<Account>>,
    pub fail_updates: Option<RepositoryError>,
    pub fail_lists: bool,
    /// Last model list written per account.
    pub updates: Mutex<HashMap<String, Vec<String>>>,
    /// Every `update_account_models` call, including failed ones.
    pub update_calls: AtomicUsize,
}

impl MemoryRepository {
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        Self { accounts: Mutex::new(accounts), ..Self::default() }
    }

    pub fn stored_models(&self, id: &str) -> Option<Vec<String>> {
        self.updates.lock().unwrap().get(id).cloned()
    }

    pub fn update_count(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountRepository for MemoryRepository {
    async fn list_accounts(&self) -> RepoResult<Vec<Account>> {
        if self.fail_lists {
            return Err(RepositoryError::Storage { message: "list unavailable".to_string() });
        }
        Ok(self.accounts.lock().unwrap().clone())
    }

    async fn get_account(&self, id: &str) -> RepoResult<Account> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound { id: id.to_string() })
    }

    async fn update_account_models(&self, account_id: &str, models: Vec<String>) -> RepoResult<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.fail_updates {
            return Err(err.clone());
        }
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or_else(|| RepositoryError::NotFound { id: account_id.to_string() })?;
        account.set_supported_models(models.clone());
        self.updates.lock().unwrap().insert(account_id.to_string(), models);
        Ok(())
    }
}
