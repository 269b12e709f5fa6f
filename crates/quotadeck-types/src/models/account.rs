//! Account model and related types.

use super::{QuotaData, TokenData};
use serde::{Deserialize, Serialize};

/// Upstream provider behind an account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Built-in Antigravity (Google) account
    #[default]
    Antigravity,
    /// User-defined OpenAI-compatible endpoint
    Custom,
    /// Any provider tag this build does not know about
    #[serde(other)]
    Unknown,
}

impl ProviderKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Antigravity => "antigravity",
            Self::Custom => "custom",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account data structure representing a configured upstream connection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    /// Unique identifier for the account
    pub id: String,
    /// Display identifier, not unique across providers
    pub email: String,
    /// Optional display name
    #[serde(default)]
    pub name: Option<String>,
    /// Provider tag; only `custom` supports model discovery
    #[serde(default)]
    pub provider: ProviderKind,
    /// Endpoint of a custom provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Authentication token data
    pub token: TokenData,
    /// Current quota information
    #[serde(default)]
    pub quota: Option<QuotaData>,
    /// Models reported by the last successful discovery, in discovery order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_models: Option<Vec<String>>,
    /// Whether the account is disabled globally
    #[serde(default)]
    pub disabled: bool,
    /// Timestamp when account was created
    #[serde(default)]
    pub created_at: i64,
    /// Timestamp when account was last used
    #[serde(default)]
    pub last_used: i64,
}

impl Account {
    /// Create a new account with the given ID, email, and token.
    pub fn new(id: String, email: String, token: TokenData) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            id,
            email,
            name: None,
            provider: ProviderKind::Antigravity,
            base_url: None,
            token,
            quota: None,
            supported_models: None,
            disabled: false,
            created_at: now,
            last_used: now,
        }
    }

    /// Create a custom-provider account with a generated ID.
    pub fn new_custom(email: String, base_url: String, api_key: String) -> Self {
        let mut account =
            Self::new(uuid::Uuid::new_v4().to_string(), email, TokenData::api_key(api_key));
        account.provider = ProviderKind::Custom;
        account.base_url = Some(base_url);
        account
    }

    /// Only custom providers can enumerate their models.
    pub fn supports_discovery(&self) -> bool {
        self.provider == ProviderKind::Custom
    }

    /// Base URL, or an empty string when absent.
    pub fn base_url_or_empty(&self) -> &str {
        self.base_url.as_deref().unwrap_or("")
    }

    /// Supported models as a slice (empty when never discovered).
    pub fn supported_models(&self) -> &[String] {
        self.supported_models.as_deref().unwrap_or(&[])
    }

    /// Per-model quota entries as a slice (empty when no snapshot).
    pub fn quota_models(&self) -> &[super::ModelQuota] {
        self.quota.as_ref().map(|q| q.models.as_slice()).unwrap_or(&[])
    }

    /// Update the quota data.
    pub fn update_quota(&mut self, quota: QuotaData) {
        self.quota = Some(quota);
    }

    /// Replace the supported model list, dropping duplicates while keeping
    /// the first occurrence of each name.
    pub fn set_supported_models(&mut self, models: Vec<String>) {
        let mut seen = std::collections::HashSet::new();
        let deduped = models.into_iter().filter(|m| seen.insert(m.clone())).collect();
        self.supported_models = Some(deduped);
    }

    /// Case-insensitive match against id or email.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        self.id == identifier || self.email.eq_ignore_ascii_case(identifier)
    }
}

/// Account index data structure (accounts.json).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountIndex {
    /// Schema version
    pub version: String,
    /// List of account summaries
    pub accounts: Vec<AccountSummary>,
}

impl AccountIndex {
    /// Create a new empty account index.
    pub fn new() -> Self {
        Self { version: "2.0".to_string(), accounts: Vec::new() }
    }
}

impl Default for AccountIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Account summary for the index file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    /// Unique identifier
    pub id: String,
    /// Email address
    pub email: String,
    /// Optional display name
    pub name: Option<String>,
    /// Creation timestamp
    pub created_at: i64,
    /// Last used timestamp
    pub last_used: i64,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            email: account.email.clone(),
            name: account.name.clone(),
            created_at: account.created_at,
            last_used: account.last_used,
        }
    }
}
