//! Application-level configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::proxy::ProxyConfig;

/// Full application configuration (`gui_config.json`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct AppConfig {
    /// UI language
    #[serde(default = "default_language")]
    pub language: String,
    /// UI theme
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Proxy configuration; absent in configs written by older builds
    #[serde(default)]
    #[validate(nested)]
    pub proxy: Option<ProxyConfig>,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_theme() -> String {
    "system".to_string()
}

impl AppConfig {
    /// Create default configuration.
    pub fn new() -> Self {
        Self { language: default_language(), theme: default_theme(), proxy: None }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
