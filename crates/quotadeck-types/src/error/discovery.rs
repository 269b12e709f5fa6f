//! Model discovery errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while enumerating the models of a custom provider.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum DiscoveryError {
    /// Base URL is empty or cannot be parsed
    #[error("Invalid base URL: '{url}'")]
    InvalidBaseUrl {
        /// The rejected base URL as configured on the account
        url: String,
    },

    /// Forwarding proxy is enabled but unusable
    #[error("Proxy configuration error: {message}")]
    ProxyConfig {
        /// Description of the proxy problem
        message: String,
    },

    /// Connection, TLS, or other transport-level failure
    #[error("Network error: {message}")]
    Transport {
        /// Description of the transport failure
        message: String,
    },

    /// Request did not complete within the configured timeout
    #[error("Request timed out after {secs}s")]
    Timeout {
        /// Configured timeout in seconds
        secs: u64,
    },

    /// Provider answered with a non-success status
    #[error("Upstream returned HTTP {status}: {body}")]
    UpstreamStatus {
        /// HTTP status code
        status: u16,
        /// Response body (truncated)
        body: String,
    },

    /// Response body was not a recognised model listing
    #[error("Malformed model list: {message}")]
    MalformedPayload {
        /// Description of the parse failure
        message: String,
    },
}

impl DiscoveryError {
    /// Check if this is a temporary error that may resolve when re-triggered.
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Transport { .. } | Self::Timeout { .. } => true,
            Self::UpstreamStatus { status, .. } => *status == 429 || *status >= 500,
            Self::InvalidBaseUrl { .. } | Self::ProxyConfig { .. } | Self::MalformedPayload { .. } => {
                false
            },
        }
    }
}
