//! Outbound proxy and request timeout configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Proxy section of the application configuration.
///
/// Every field is optional on disk; `quotadeck_core::modules::config`
/// resolves absent values to their documented defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, Validate)]
pub struct ProxyConfig {
    /// Request timeout in seconds; zero means "use the default"
    #[validate(range(max = 3600_u64))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    /// Forwarding proxy for outbound requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_proxy: Option<UpstreamProxyConfig>,
}

/// Forwarding proxy for outbound requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UpstreamProxyConfig {
    /// Route requests through `url`
    #[serde(default)]
    pub enabled: bool,
    /// Proxy URL (e.g., socks5://127.0.0.1:1080 or http://vps:8045)
    #[serde(default)]
    pub url: String,
}

impl UpstreamProxyConfig {
    /// A disabled proxy with an empty URL.
    pub fn disabled() -> Self {
        Self::default()
    }
}

pub const fn default_request_timeout() -> u64 {
    30
}
