//! Single-flight model discovery per account.
//!
//! ```text
//!   Idle ──refresh──▶ InFlight ──models──▶ Persisting ──ack──▶ Idle (Discovered)
//!    ▲                   │                     │
//!    └──── error ────────┴─────── error ───────┘
//! ```
//!
//! A refresh observed while an account is not Idle is dropped, not queued.


use std::collections::HashSet;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use quotadeck_types::Account;
use serde::Serialize;

use super::config::DiscoverySettings;
use super::discovery::ModelDiscovery;
use super::feed::AccountFeed;
use super::repository::AccountRepository;
use crate::error::RefreshError;

/// Where one account is in its discovery cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshState {
    Idle,
    InFlight,
    Persisting,
}

/// Result of a refresh request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// Discovery ran and the repository accepted the model list.
    Discovered { model_count: usize },
    /// Another cycle for this account was already running; nothing was done.
    AlreadyInFlight,
}

/// Orchestrates discovery and persistence, at most one cycle per account.
pub struct RefreshCoordinator {
    discovery: Arc<dyn ModelDiscovery>,
    repository: Arc<dyn AccountRepository>,
    feed: Option<AccountFeed>,
    states: DashMap<String, RefreshState>,
}

/// Returns the account to Idle when the cycle ends, however it ends.
struct FlightGuard<'a> {
    states: &'a DashMap<String, RefreshState>,
    account_id: String,
}

impl FlightGuard<'_> {
    fn advance(&self, state: RefreshState) {
        if let Some(mut entry) = self.states.get_mut(&self.account_id) {
            *entry = state;
        }
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.states.remove(&self.account_id);
    }
}

impl RefreshCoordinator {
    pub fn new(discovery: Arc<dyn ModelDiscovery>, repository: Arc<dyn AccountRepository>) -> Self {
        Self { discovery, repository, feed: None, states: DashMap::new() }
    }

    /// Publish the account list through `feed` after every successful cycle.
    #[must_use]
    pub fn with_feed(mut self, feed: AccountFeed) -> Self {
        self.feed = Some(feed);
        self
    }

    pub fn state(&self, account_id: &str) -> RefreshState {
        self.states.get(account_id).map_or(RefreshState::Idle, |s| *s)
    }

    /// True while a cycle for this account is running.
    pub fn is_busy(&self, account_id: &str) -> bool {
        self.state(account_id) != RefreshState::Idle
    }

    fn try_begin(&self, account_id: &str) -> Option<FlightGuard<'_>> {
        match self.states.entry(account_id.to_string()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                slot.insert(RefreshState::InFlight);
                Some(FlightGuard { states: &self.states, account_id: account_id.to_string() })
            },
        }
    }

    /// Discover the account's models and persist them.
    ///
    /// Never touches `account`; the new list is visible only after the
    /// account list is fetched again.
    pub async fn refresh(
        &self,
        account: &Account,
        settings: &DiscoverySettings,
    ) -> Result<RefreshOutcome, RefreshError> {
        if !account.supports_discovery() {
            return Err(RefreshError::DiscoveryUnsupported {
                account_id: account.id.clone(),
                provider: account.provider,
            });
        }

        let Some(guard) = self.try_begin(&account.id) else {
            tracing::debug!(
                account_id = %account.id,
                "Discovery already in flight, ignoring request"
            );
            return Ok(RefreshOutcome::AlreadyInFlight);
        };

        tracing::info!(
            account_id = %account.id,
            email = %account.email,
            "Starting model discovery"
        );

        let discovered = self
            .discovery
            .discover_models(
                account.base_url_or_empty(),
                account.token.refresh_token_or_empty(),
                &settings.proxy,
                settings.request_timeout,
            )
            .await
            .map_err(|e| {
                tracing::warn!(
                    account_id = %account.id,
                    transient = e.is_transient(),
                    "Model discovery failed: {}",
                    e
                );
                RefreshError::from(e)
            })?;

        let mut seen = HashSet::new();
        let models: Vec<String> =
            discovered.into_iter().filter(|m| seen.insert(m.clone())).collect();
        let model_count = models.len();

        guard.advance(RefreshState::Persisting);

        self.repository.update_account_models(&account.id, models).await.map_err(|e| {
            tracing::error!(account_id = %account.id, "Failed to save discovered models: {}", e);
            RefreshError::from(e)
        })?;

        if let Some(feed) = &self.feed {
            if let Err(e) = feed.fetch_accounts().await {
                tracing::warn!("Models saved but account list reload failed: {}", e);
            }
        }

        drop(guard);
        tracing::info!(account_id = %account.id, model_count, "Model discovery complete");
        Ok(RefreshOutcome::Discovered { model_count })
    }
}

impl std::fmt::Debug for RefreshCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshCoordinator")
            .field("in_flight", &self.states.len())
            .field("has_feed", &self.feed.is_some())
            .finish()
    }
}

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// The single notification shown for a finished refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshNotice {
    pub level: NoticeLevel,
    pub message: String,
}

impl RefreshNotice {
    /// Build the notice for a refresh result. A dropped in-flight request
    /// produces none.
    pub fn from_result(result: &Result<RefreshOutcome, RefreshError>) -> Option<Self> {
        match result {
            Ok(RefreshOutcome::Discovered { model_count }) => Some(Self {
                level: NoticeLevel::Success,
                message: match model_count {
                    1 => "Discovered 1 model".to_string(),
                    n => format!("Discovered {n} models"),
                },
            }),
            Ok(RefreshOutcome::AlreadyInFlight) => None,
            Err(e) => Some(Self { level: NoticeLevel::Error, message: format!("Error: {e}") }),
        }
    }
}
