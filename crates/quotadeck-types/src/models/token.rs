//! Token data model.

use serde::{Deserialize, Serialize};

/// Credentials attached to an account.
///
/// For built-in providers this is an OAuth token pair. For `custom`
/// providers `refresh_token` carries the provider API key and the access
/// token fields are unused.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenData {
    /// OAuth access token
    #[serde(default)]
    pub access_token: String,
    /// OAuth refresh token, or the API key of a custom provider
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Token validity duration in seconds
    #[serde(default)]
    pub expires_in: i64,
    /// Absolute timestamp when token expires
    #[serde(default)]
    pub expiry_timestamp: i64,
    /// Token type (usually "Bearer")
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Email associated with the token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Google Cloud project ID for API requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Antigravity session ID for prompt caching
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl TokenData {
    /// Create new token data. A missing or non-positive `expires_in` leaves
    /// the expiry timestamp at zero.
    pub fn new(
        access_token: String,
        refresh_token: Option<String>,
        expires_in: Option<i64>,
        email: Option<String>,
        project_id: Option<String>,
        session_id: Option<String>,
    ) -> Self {
        let expires_in = expires_in.unwrap_or(0);
        let expiry_timestamp = if expires_in > 0 {
            chrono::Utc::now().timestamp().saturating_add(expires_in)
        } else {
            0
        };
        Self {
            access_token,
            refresh_token,
            expires_in,
            expiry_timestamp,
            token_type: default_token_type(),
            email,
            project_id,
            session_id,
        }
    }

    /// Token data for a custom provider: only the API key is meaningful.
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::new(String::new(), Some(key.into()), None, None, None, None)
    }

    /// The refresh token, or an empty string when absent.
    pub fn refresh_token_or_empty(&self) -> &str {
        self.refresh_token.as_deref().unwrap_or("")
    }
}
