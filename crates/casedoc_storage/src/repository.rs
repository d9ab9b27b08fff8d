//! Case repository trait definition.

use crate::error::RepositoryResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted case row.
///
/// Rows are what repositories store and return; the document column is
/// opaque UTF-8 JSON text that only the codec layer interprets. An empty
/// or absent document is stored as `None`, never as the literal text
/// `"{}"` or `"null"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRow {
    /// Primary key. Immutable once created.
    pub case_uuid: Uuid,
    /// Optional human-readable secondary key, unique where present.
    pub case_id: Option<String>,
    /// Document column: JSON text, or `None` for an empty document.
    pub document: Option<String>,
}

impl CaseRow {
    /// Creates a row with an empty document column.
    #[must_use]
    pub fn empty(case_uuid: Uuid, case_id: Option<String>) -> Self {
        Self {
            case_uuid,
            case_id,
            document: None,
        }
    }
}

/// A keyed record store holding one row per case.
///
/// Repositories are **opaque row stores**: they never parse the document
/// column. `save` upserts by primary key and enforces uniqueness of the
/// secondary key; deletes are idempotent. Implementations must be
/// `Send + Sync` so a store can be shared across threads.
///
/// # Implementors
///
/// - [`super::InMemoryRepository`] - For tests and ephemeral stores
/// - [`super::FileRepository`] - For durable single-process deployments
pub trait CaseRepository: Send + Sync {
    /// Finds a row by its primary key.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn find_by_case_uuid(&self, case_uuid: &Uuid) -> RepositoryResult<Option<CaseRow>>;

    /// Finds a row by its human-readable secondary key.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn find_by_case_id(&self, case_id: &str) -> RepositoryResult<Option<CaseRow>>;

    /// Checks whether a row exists for the primary key.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn exists_by_case_uuid(&self, case_uuid: &Uuid) -> RepositoryResult<bool>;

    /// Checks whether a row exists for the secondary key.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn exists_by_case_id(&self, case_id: &str) -> RepositoryResult<bool>;

    /// Inserts or replaces the row for `row.case_uuid`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RepositoryError::DuplicateCaseId`] if the row's
    /// secondary key is already bound to a different case, or an error if
    /// the underlying store fails.
    fn save(&self, row: CaseRow) -> RepositoryResult<()>;

    /// Deletes the row for the primary key. Missing rows are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn delete_by_case_uuid(&self, case_uuid: &Uuid) -> RepositoryResult<()>;

    /// Deletes the row for the secondary key. Missing rows are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn delete_by_case_id(&self, case_id: &str) -> RepositoryResult<()>;
}
