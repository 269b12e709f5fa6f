//! Model discovery for custom (OpenAI-compatible) providers.

use std::collections::HashSet;

use async_trait::async_trait;
use quotadeck_types::{DiscoveryError, UpstreamProxyConfig};
use serde::Deserialize;

use crate::utils::http::create_client_with_proxy;

const MAX_ERROR_BODY_CHARS: usize = 512;

/// Enumerates the models a provider endpoint currently serves.
///
/// Implementations perform a single attempt; retrying is left to the user.
#[async_trait]
pub trait ModelDiscovery: Send + Sync {
    async fn discover_models(
        &self,
        base_url: &str,
        refresh_token: &str,
        proxy: &UpstreamProxyConfig,
        timeout_secs: u64,
    ) -> Result<Vec<String>, DiscoveryError>;
}

/// Discovery over HTTP against `GET {base}/v1/models`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpModelDiscovery;

impl HttpModelDiscovery {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ModelDiscovery for HttpModelDiscovery {
    async fn discover_models(
        &self,
        base_url: &str,
        refresh_token: &str,
        proxy: &UpstreamProxyConfig,
        timeout_secs: u64,
    ) -> Result<Vec<String>, DiscoveryError> {
        let models_url = build_models_url(base_url)?;
        let client = create_client_with_proxy(timeout_secs, proxy)?;

        tracing::debug!(url = %models_url, timeout_secs, proxied = proxy.enabled, "Listing provider models");

        let mut request = client.get(models_url.as_str());
        if !refresh_token.is_empty() {
            request = request.bearer_auth(refresh_token);
        }

        let response = request.send().await.map_err(|e| map_transport_error(&e, timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(DiscoveryError::UpstreamStatus {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let body = response.bytes().await.map_err(|e| map_transport_error(&e, timeout_secs))?;
        let models = parse_model_list(&body)?;

        tracing::info!(count = models.len(), "Provider reported models");
        Ok(models)
    }
}

fn map_transport_error(e: &reqwest::Error, timeout_secs: u64) -> DiscoveryError {
    if e.is_timeout() {
        DiscoveryError::Timeout { secs: timeout_secs }
    } else {
        DiscoveryError::Transport { message: e.to_string() }
    }
}

/// Build the model listing URL. A base already ending in `/v1` gets
/// `/models` appended, anything else gets `/v1/models`.
pub fn build_models_url(base_url: &str) -> Result<url::Url, DiscoveryError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let invalid = || DiscoveryError::InvalidBaseUrl { url: base_url.to_string() };

    if trimmed.is_empty() {
        return Err(invalid());
    }

    let candidate = if trimmed.ends_with("/v1") {
        format!("{trimmed}/models")
    } else {
        format!("{trimmed}/v1/models")
    };

    let parsed = url::Url::parse(&candidate).map_err(|_| invalid())?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(invalid()),
    }
}

#[derive(Debug, Deserialize)]
struct ModelListResponse {
    #[serde(default)]
    data: Option<Vec<ModelEntry>>,
    #[serde(default)]
    models: Option<Vec<ModelEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ModelEntry {
    Bare(String),
    Object {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
}

impl ModelEntry {
    fn into_id(self) -> Option<String> {
        let raw = match self {
            Self::Bare(id) => id,
            Self::Object { id, name } => id.or(name)?,
        };
        let id = raw.trim();
        let id = id.strip_prefix("models/").unwrap_or(id);
        if id.is_empty() {
            None
        } else {
            Some(id.to_string())
        }
    }
}

/// Parse a model listing body into unique ids, keeping provider order.
pub fn parse_model_list(body: &[u8]) -> Result<Vec<String>, DiscoveryError> {
    let parsed: ModelListResponse = serde_json::from_slice(body)
        .map_err(|e| DiscoveryError::MalformedPayload { message: e.to_string() })?;

    let entries = parsed.data.or(parsed.models).ok_or_else(|| DiscoveryError::MalformedPayload {
        message: "response has neither 'data' nor 'models' array".to_string(),
    })?;

    let mut seen = HashSet::new();
    Ok(entries
        .into_iter()
        .filter_map(ModelEntry::into_id)
        .filter(|id| seen.insert(id.clone()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_models_url() {
        let url = build_models_url("https://api.example.com").map(|u| u.to_string());
        assert_eq!(url.ok().as_deref(), Some("https://api.example.com/v1/models"));

        let url = build_models_url("https://api.example.com/v1/").map(|u| u.to_string());
        assert_eq!(url.ok().as_deref(), Some("https://api.example.com/v1/models"));

        let url = build_models_url("http://10.0.0.2:8045/openai").map(|u| u.to_string());
        assert_eq!(url.ok().as_deref(), Some("http://10.0.0.2:8045/openai/v1/models"));
    }

    #[test]
    fn test_build_models_url_rejects_empty_and_bad_scheme() {
        assert!(matches!(build_models_url(""), Err(DiscoveryError::InvalidBaseUrl { .. })));
        assert!(matches!(build_models_url("   "), Err(DiscoveryError::InvalidBaseUrl { .. })));
        assert!(matches!(build_models_url("ftp://host"), Err(DiscoveryError::InvalidBaseUrl { .. })));
        assert!(matches!(build_models_url("no scheme"), Err(DiscoveryError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_parse_openai_shape_dedupes() {
        let body = br#"{"object":"list","data":[{"id":"gpt-4o"},{"id":"o3"},{"id":"gpt-4o"}]}"#;
        assert_eq!(parse_model_list(body).ok(), Some(vec!["gpt-4o".to_string(), "o3".to_string()]));
    }

    #[test]
    fn test_parse_models_shape_strips_prefix() {
        let body = br#"{"models":[{"name":"models/gemini-3-pro"},"gemini-3-flash",{"id":""}]}"#;
        assert_eq!(
            parse_model_list(body).ok(),
            Some(vec!["gemini-3-pro".to_string(), "gemini-3-flash".to_string()])
        );
    }

    #[test]
    fn test_parse_rejects_unrecognised_payloads() {
        assert!(matches!(
            parse_model_list(br#"{"object":"list"}"#),
            Err(DiscoveryError::MalformedPayload { .. })
        ));
        assert!(matches!(parse_model_list(b"<html>"), Err(DiscoveryError::MalformedPayload { .. })));
    }

    #[tokio::test]
    async fn test_empty_base_url_fails_fast() {
        let result = HttpModelDiscovery::new()
            .discover_models("", "sk", &UpstreamProxyConfig::disabled(), 30)
            .await;
        assert!(matches!(result, Err(DiscoveryError::InvalidBaseUrl { .. })));
    }
}
