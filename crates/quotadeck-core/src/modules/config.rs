//! Application config loading and resolution of discovery settings.

use std::fs;
use std::path::Path;

use quotadeck_types::models::config::default_request_timeout;
use quotadeck_types::{AppConfig, ConfigError, UpstreamProxyConfig};
use validator::Validate;

use super::account::get_data_dir;

const CONFIG_FILE: &str = "gui_config.json";

/// Fully-populated settings for one discovery request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverySettings {
    pub proxy: UpstreamProxyConfig,
    pub request_timeout: u64,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self { proxy: UpstreamProxyConfig::disabled(), request_timeout: default_request_timeout() }
    }
}

/// Resolve discovery settings from an optional config.
///
/// Missing config, proxy section, or upstream proxy fall back to a disabled
/// proxy with an empty URL. A missing or zero timeout falls back to 30 seconds.
pub fn resolve_discovery_settings(config: Option<&AppConfig>) -> DiscoverySettings {
    let proxy_section = config.and_then(|c| c.proxy.as_ref());

    let proxy = proxy_section
        .and_then(|p| p.upstream_proxy.clone())
        .unwrap_or_else(UpstreamProxyConfig::disabled);

    let request_timeout = proxy_section
        .and_then(|p| p.request_timeout)
        .filter(|secs| *secs > 0)
        .unwrap_or_else(default_request_timeout);

    DiscoverySettings { proxy, request_timeout }
}

/// Load the application config from the default data directory.
///
/// Returns `Ok(None)` when no config file exists yet.
pub fn load_config() -> Result<Option<AppConfig>, ConfigError> {
    load_config_from(&get_data_dir()?)
}

/// Load the application config from `data_dir`.
pub fn load_config_from(data_dir: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let config_path = data_dir.join(CONFIG_FILE);

    if !config_path.exists() {
        tracing::debug!("No config at {}, using defaults", config_path.display());
        return Ok(None);
    }

    let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::ParseError {
        message: format!("failed to read {}: {e}", config_path.display()),
    })?;

    let config: AppConfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(&e))?;

    config.validate().map_err(|e| ConfigError::ValidationError {
        field: "proxy".to_string(),
        message: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Save the application config to the default data directory.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(&get_data_dir()?, config)
}

/// Save the application config atomically to `data_dir`.
pub fn save_config_to(data_dir: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    let config_path = data_dir.join(CONFIG_FILE);
    let temp_path = data_dir.join(format!("{}.tmp", CONFIG_FILE));

    let content =
        serde_json::to_string_pretty(config).map_err(|e| ConfigError::from_json_error(&e))?;

    fs::write(&temp_path, content).map_err(|e| ConfigError::from_io_error(&e))?;
    fs::rename(&temp_path, &config_path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ConfigError::from_io_error(&e)
    })
}
