//! Typed error definitions for QuotaDeck.
//!
//! One enum per domain. Each is serializable (tagged `type` / `details`) so it
//! can be handed to a front end as-is.

mod config;
mod discovery;
mod repository;

pub use config::ConfigError;
pub use discovery::DiscoveryError;
pub use repository::RepositoryError;
