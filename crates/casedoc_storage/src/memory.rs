//! In-memory case repository for testing.

use crate::error::{RepositoryError, RepositoryResult};
use crate::repository::{CaseRepository, CaseRow};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

/// An in-memory case repository.
///
/// Rows live in a primary map keyed by case UUID with a secondary index
/// for the human-readable case id. Suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral stores that don't need persistence
///
/// # Thread Safety
///
/// This repository is thread-safe and can be shared across threads.
///
/// # Example
///
/// ```rust
/// use casedoc_storage::{CaseRepository, CaseRow, InMemoryRepository};
/// use uuid::Uuid;
///
/// let repository = InMemoryRepository::new();
/// let id = Uuid::new_v4();
/// repository.save(CaseRow::empty(id, None)).unwrap();
/// assert!(repository.exists_by_case_uuid(&id).unwrap());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    rows: HashMap<Uuid, CaseRow>,
    by_case_id: HashMap<String, Uuid>,
}

impl InMemoryRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().rows.len()
    }

    /// Returns true if no rows are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().rows.is_empty()
    }
}

impl Inner {
    fn remove(&mut self, case_uuid: &Uuid) {
        if let Some(old) = self.rows.remove(case_uuid) {
            if let Some(case_id) = old.case_id {
                self.by_case_id.remove(&case_id);
            }
        }
    }
}

impl CaseRepository for InMemoryRepository {
    fn find_by_case_uuid(&self, case_uuid: &Uuid) -> RepositoryResult<Option<CaseRow>> {
        Ok(self.inner.read().rows.get(case_uuid).cloned())
    }

    fn find_by_case_id(&self, case_id: &str) -> RepositoryResult<Option<CaseRow>> {
        let inner = self.inner.read();
        Ok(inner
            .by_case_id
            .get(case_id)
            .and_then(|uuid| inner.rows.get(uuid))
            .cloned())
    }

    fn exists_by_case_uuid(&self, case_uuid: &Uuid) -> RepositoryResult<bool> {
        Ok(self.inner.read().rows.contains_key(case_uuid))
    }

    fn exists_by_case_id(&self, case_id: &str) -> RepositoryResult<bool> {
        Ok(self.inner.read().by_case_id.contains_key(case_id))
    }

    fn save(&self, row: CaseRow) -> RepositoryResult<()> {
        let mut inner = self.inner.write();

        if let Some(case_id) = &row.case_id {
            if let Some(owner) = inner.by_case_id.get(case_id) {
                if owner != &row.case_uuid {
                    return Err(RepositoryError::duplicate_case_id(case_id.clone()));
                }
            }
        }

        // Drop a previous secondary-key binding if the row's case id changed.
        if let Some(old) = inner.rows.get(&row.case_uuid) {
            if old.case_id != row.case_id {
                if let Some(old_case_id) = old.case_id.clone() {
                    inner.by_case_id.remove(&old_case_id);
                }
            }
        }

        if let Some(case_id) = row.case_id.clone() {
            inner.by_case_id.insert(case_id, row.case_uuid);
        }
        inner.rows.insert(row.case_uuid, row);
        Ok(())
    }

    fn delete_by_case_uuid(&self, case_uuid: &Uuid) -> RepositoryResult<()> {
        self.inner.write().remove(case_uuid);
        Ok(())
    }

    fn delete_by_case_id(&self, case_id: &str) -> RepositoryResult<()> {
        let mut inner = self.inner.write();
        if let Some(uuid) = inner.by_case_id.get(case_id).copied() {
            inner.remove(&uuid);
        }
        Ok(())
    }
}
