//! Core domain models for QuotaDeck.
//!
//! This module contains all shared data structures used across the workspace.

mod account;
pub mod config;
mod quota;
mod token;

// Re-export all models
pub use account::{Account, AccountIndex, AccountSummary, ProviderKind};
pub use config::{AppConfig, ProxyConfig, UpstreamProxyConfig};
pub use quota::{ModelQuota, QuotaData, QuotaTier};
pub use token::TokenData;
