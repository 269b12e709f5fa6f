use anyhow::Result;
use colored::Colorize;

use quotadeck_core::modules::config::{load_config, resolve_discovery_settings};
use quotadeck_core::utils::http::redact_proxy_url;
use quotadeck_core::AppConfig;

pub fn show_config(json: bool) -> Result<()> {
    let loaded = load_config()?;
    let settings = resolve_discovery_settings(loaded.as_ref());

    if json {
        let config = loaded.unwrap_or_default();
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    if loaded.is_none() {
        println!("{}", "No config file found, showing defaults.".yellow());
    }
    let config: AppConfig = loaded.unwrap_or_default();

    println!("{}", "General:".cyan().bold());
    println!("  Language: {}", config.language);
    println!("  Theme: {}", config.theme);

    println!("{}", "Model Discovery:".cyan().bold());
    println!("  Request Timeout: {}s", settings.request_timeout);
    println!("  Upstream Proxy: {}", describe_proxy(settings.proxy.enabled, &settings.proxy.url));
    Ok(())
}

fn describe_proxy(enabled: bool, url: &str) -> String {
    match (enabled, url.is_empty()) {
        (false, _) => "disabled".to_string(),
        (true, true) => "enabled (no URL set)".to_string(),
        (true, false) => redact_proxy_url(url),
    }
}
