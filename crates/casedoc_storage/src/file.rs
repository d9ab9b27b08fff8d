//! File-based case repository for durable single-process deployments.

use crate::error::{RepositoryError, RepositoryResult};
use crate::repository::{CaseRepository, CaseRow};
use fs2::FileExt;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Advisory lock for single-writer access.
const LOCK_FILE: &str = "LOCK";
/// Extension of persisted row files.
const ROW_EXTENSION: &str = "json";
/// Suffix of the temporary file used for atomic row writes.
const TEMP_SUFFIX: &str = "json.tmp";

/// A file-based case repository.
///
/// Each case row is persisted as one JSON file named by its UUID:
///
/// ```text
/// <dir>/
/// ├─ LOCK                 # Advisory lock for single-writer
/// ├─ <case_uuid>.json     # One row per case
/// └─ ...
/// ```
///
/// Rows are written to a temporary file and renamed into place, so a
/// crash mid-write never leaves a half-written row. All rows are loaded
/// at open and kept in memory; the secondary-key index is rebuilt from
/// the scan.
///
/// # Thread Safety
///
/// The repository is thread-safe within one process; the LOCK file keeps
/// a second process out.
#[derive(Debug)]
pub struct FileRepository {
    dir: PathBuf,
    /// Lock file handle (held for exclusive access).
    _lock_file: File,
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    rows: HashMap<Uuid, CaseRow>,
    by_case_id: HashMap<String, Uuid>,
}

impl FileRepository {
    /// Opens or creates a repository directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Another process holds the lock (returns `Locked`)
    /// - A persisted row cannot be parsed (returns `Corrupted`)
    /// - I/O errors occur
    pub fn open(path: &Path) -> RepositoryResult<Self> {
        fs::create_dir_all(path)?;

        let lock_file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path.join(LOCK_FILE))?;
        lock_file
            .try_lock_exclusive()
            .map_err(|_| RepositoryError::Locked)?;

        let inner = Self::scan(path)?;

        Ok(Self {
            dir: path.to_path_buf(),
            _lock_file: lock_file,
            inner: RwLock::new(inner),
        })
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

    fn scan(path: &Path) -> RepositoryResult<Inner> {
        let mut inner = Inner::default();

        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let file_path = entry.path();
            if file_path.extension().and_then(|e| e.to_str()) != Some(ROW_EXTENSION) {
                continue;
            }

            let text = fs::read_to_string(&file_path)?;
            let row: CaseRow = serde_json::from_str(&text).map_err(|e| {
                RepositoryError::corrupted(format!(
                    "unreadable row file {}: {e}",
                    file_path.display()
                ))
            })?;

            if let Some(case_id) = row.case_id.clone() {
                if inner.by_case_id.insert(case_id.clone(), row.case_uuid).is_some() {
                    return Err(RepositoryError::corrupted(format!(
                        "case id {case_id:?} appears in more than one row"
                    )));
                }
            }
            inner.rows.insert(row.case_uuid, row);
        }

        Ok(inner)
    }

    fn row_path(&self, case_uuid: &Uuid) -> PathBuf {
        self.dir.join(format!("{case_uuid}.{ROW_EXTENSION}"))
    }

    fn temp_path(&self, case_uuid: &Uuid) -> PathBuf {
        self.dir.join(format!("{case_uuid}.{TEMP_SUFFIX}"))
    }

    fn write_row(&self, row: &CaseRow) -> RepositoryResult<()> {
        let text = serde_json::to_string(row)
            .map_err(|e| RepositoryError::corrupted(format!("failed to serialize row: {e}")))?;

        let temp_path = self.temp_path(&row.case_uuid);
        let mut file = File::create(&temp_path)?;
        file.write_all(text.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, self.row_path(&row.case_uuid))?;
        Ok(())
    }
}

impl CaseRepository for FileRepository {
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

        self.write_row(&row)?;

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
        let mut inner = self.inner.write();
        if let Some(old) = inner.rows.remove(case_uuid) {
            if let Some(case_id) = old.case_id {
                inner.by_case_id.remove(&case_id);
            }
            fs::remove_file(self.row_path(case_uuid))?;
        }
        Ok(())
    }

    fn delete_by_case_id(&self, case_id: &str) -> RepositoryResult<()> {
        let uuid = { self.inner.read().by_case_id.get(case_id).copied() };
        match uuid {
            Some(uuid) => self.delete_by_case_uuid(&uuid),
            None => Ok(()),
        }
    }
}
