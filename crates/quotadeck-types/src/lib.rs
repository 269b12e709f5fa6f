//! # QuotaDeck Types
//!
//! Core types, models, and error definitions for QuotaDeck.
//!
//! This crate provides the foundational type system for the workspace:
//!
//! - **`error`** - Typed error hierarchy for discovery, persistence, and configuration
//! - **`models`** - Domain models (Account, Token, Quota, Config)
//!
//! ## Architecture Role
//!
//! `quotadeck-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!          quotadeck-types (this crate)
//!                  │
//!                  ▼
//!           quotadeck-core
//!                  │
//!                  ▼
//!           quotadeck-cli
//! ```
//!
//! All types are designed to be:
//! - **Serializable** via serde for API/IPC
//! - **Clone** for cheap sharing across async boundaries
//! - **PartialEq** for testing and comparison

pub mod error;
pub mod models;

// Re-export error types for convenience
pub use error::{ConfigError, DiscoveryError, RepositoryError};

// Re-export core model types
pub use models::{
    Account, AccountIndex, AccountSummary, AppConfig, ModelQuota, ProviderKind, ProxyConfig,
    QuotaData, QuotaTier, TokenData, UpstreamProxyConfig,
};
