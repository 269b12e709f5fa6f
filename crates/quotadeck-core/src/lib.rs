//! # QuotaDeck Core
//!
//! Decision logic and I/O plumbing behind the account details view.
//!
//! ```text
//! quotadeck-core/src/
//! ├── modules/
//! │   ├── model_filter.rs  # case-insensitive model search
//! │   ├── discovery.rs     # custom provider model enumeration
//! │   ├── repository.rs    # AccountRepository trait
//! │   ├── account/         # JSON file repository
//! │   ├── config.rs        # gui_config.json + default resolution
//! │   ├── feed.rs          # account list broadcast (fetchAccounts)
//! │   ├── refresh/         # single-flight discovery coordinator
//! │   └── view.rs          # what to show for one account
//! └── utils/               # HTTP client builder, reset-time formatting
//! ```

#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

pub mod error;
pub mod modules;
pub mod utils;

#[cfg(test)]
mod test_helpers;

// Re-export commonly used types
pub use error::RefreshError;
pub use modules::config::DiscoverySettings;
pub use modules::discovery::{HttpModelDiscovery, ModelDiscovery};
pub use modules::refresh::{RefreshCoordinator, RefreshNotice, RefreshOutcome, RefreshState};
pub use modules::repository::AccountRepository;
pub use modules::view::{AccountQuotaView, AccountView, ModelSection, QuotaRow, QuotaSection};
pub use quotadeck_types::models::{Account, AppConfig, QuotaData, TokenData};
