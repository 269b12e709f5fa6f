//! Application and proxy configuration models.

mod app;
mod proxy;

pub use app::AppConfig;
pub use proxy::{default_request_timeout, ProxyConfig, UpstreamProxyConfig};
