//! Account persistence errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while reading or writing accounts.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum RepositoryError {
    /// Account with given ID not found
    #[error("Account not found: {id}")]
    NotFound {
        /// Unique identifier of the missing account
        id: String,
    },

    /// Account ID cannot be used as a file name
    #[error("Invalid account id: '{id}'")]
    InvalidId {
        /// The rejected identifier
        id: String,
    },

    /// Account storage/filesystem error
    #[error("Account storage error: {message}")]
    Storage {
        /// Description of the storage failure
        message: String,
    },

    /// Account data could not be (de)serialized
    #[error("Account serialization error: {message}")]
    Serialization {
        /// Description of the serialization failure
        message: String,
    },
}

impl RepositoryError {
    /// Create a storage error from an IO error.
    pub fn from_io_error(e: &std::io::Error) -> Self {
        Self::Storage { message: e.to_string() }
    }

    /// Create a serialization error from a serde_json error.
    pub fn from_json_error(e: &serde_json::Error) -> Self {
        Self::Serialization { message: e.to_string() }
    }
}
