//! Error type returned by the refresh coordinator.

use quotadeck_types::{DiscoveryError, ProviderKind, RepositoryError};
use serde::Serialize;
use thiserror::Error;

/// A discovery cycle that did not complete.
///
/// `Display` carries the original cause verbatim so it can be shown to the
/// user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RefreshError {
    /// The provider could not enumerate its models.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// Discovery succeeded but the result could not be persisted.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Discovery was requested for a built-in provider.
    #[error("Model discovery is only available for custom providers (account {account_id} is {provider})")]
    DiscoveryUnsupported { account_id: String, provider: ProviderKind },
}

impl RefreshError {
    /// True when the failure happened after the provider answered.
    pub const fn is_persistence_failure(&self) -> bool {
        matches!(self, Self::Repository(_))
    }
}

impl Serialize for RefreshError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}
