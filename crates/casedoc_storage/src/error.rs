//! Error types for repository operations.

use std::io;
use thiserror::Error;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors that can occur in a case repository.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A stored row could not be read back.
    #[error("repository corrupted: {message}")]
    Corrupted {
        /// Description of the corruption.
        message: String,
    },

    /// Another process holds the repository lock.
    #[error("repository locked: another process has exclusive access")]
    Locked,

    /// A row with the same human-readable case id already exists.
    #[error("case id {case_id:?} is already bound to another case")]
    DuplicateCaseId {
        /// The conflicting case id.
        case_id: String,
    },
}

impl RepositoryError {
    /// Creates a corruption error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::Corrupted {
            message: message.into(),
        }
    }

    /// Creates a duplicate case id error.
    pub fn duplicate_case_id(case_id: impl Into<String>) -> Self {
        Self::DuplicateCaseId {
            case_id: case_id.into(),
        }
    }
}
