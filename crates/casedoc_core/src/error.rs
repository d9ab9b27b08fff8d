//! Error types for the document store core.

use casedoc_codec::CodecError;
use casedoc_storage::RepositoryError;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in document store operations.
///
/// None of these represent a transient condition the core could retry;
/// all are surfaced to the caller unchanged.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A key could not be parsed into a path. Raised before any store
    /// access.
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath {
        /// The raw key that failed to parse.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// No case record exists for the given key.
    #[error("no case found for {key}")]
    CaseNotFound {
        /// The primary or secondary key that was looked up.
        key: String,
    },

    /// A string could not be parsed as a case UUID.
    #[error("invalid case uuid {value:?}")]
    InvalidCaseUuid {
        /// The offending string.
        value: String,
    },

    /// Document codec error.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Persistence collaborator error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl CoreError {
    /// Creates an invalid path error.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a case-not-found error.
    pub fn case_not_found(key: impl ToString) -> Self {
        Self::CaseNotFound {
            key: key.to_string(),
        }
    }

    /// Creates an invalid case uuid error.
    pub fn invalid_case_uuid(value: impl Into<String>) -> Self {
        Self::InvalidCaseUuid {
            value: value.into(),
        }
    }
}
