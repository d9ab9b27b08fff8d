//! The per-case document store.

use crate::case::{CaseId, CaseRecord};
use crate::config::StoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::events::CaseCreatedEvent;
use crate::merge::deep_merge;
use crate::nested::{get_nested, set_nested};
use crate::path::KeyPath;
use casedoc_codec::{from_json_text_with, to_json_text, Document, Value};
use casedoc_storage::{CaseRepository, CaseRow};
use tracing::debug;

/// Keyed persistence of one document per case.
///
/// The store holds exactly its persistence collaborator and its
/// configuration; it has no process-wide state. Every mutating
/// operation is one fetch-mutate-store sequence over the whole record,
/// so concurrent writers to the same case resolve last-writer-wins at
/// document granularity. Isolation beyond that belongs to the
/// repository.
///
/// # Example
///
/// ```rust
/// use casedoc_core::{CaseId, DocumentStore};
/// use casedoc_codec::Value;
/// use casedoc_storage::InMemoryRepository;
///
/// let store = DocumentStore::new(InMemoryRepository::new());
/// let id = CaseId::new();
///
/// store.upsert_merge(id, vec![("a.b".to_string(), Value::Integer(1))]).unwrap();
/// let value = store.read_at_path(id, "a.b").unwrap();
/// assert_eq!(value, Some(Value::Integer(1)));
/// ```
pub struct DocumentStore<R> {
    /// Persistence collaborator.
    repository: R,
    /// Codec and deployment-mode configuration.
    config: StoreConfig,
}

impl<R: CaseRepository> DocumentStore<R> {
    /// Creates a store with the default configuration.
    pub fn new(repository: R) -> Self {
        Self::with_config(repository, StoreConfig::default())
    }

    /// Creates a store with an explicit configuration.
    pub fn with_config(repository: R, config: StoreConfig) -> Self {
        Self { repository, config }
    }

    /// Returns the store configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Seeds an empty document for a case known only by UUID.
    ///
    /// Creation is idempotent: if a record already exists it is returned
    /// unchanged, so a replayed creation trigger never wipes data.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository or codec fails.
    pub fn create(&self, case_uuid: CaseId) -> CoreResult<CaseRecord> {
        self.create_record(case_uuid, None)
    }

    /// Seeds an empty document, binding the human-readable case id.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository or codec fails.
    pub fn create_with_case_id(
        &self,
        case_uuid: CaseId,
        case_id: impl Into<String>,
    ) -> CoreResult<CaseRecord> {
        self.create_record(case_uuid, Some(case_id.into()))
    }

    /// Checks whether a record exists for the case UUID.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    pub fn exists(&self, case_uuid: CaseId) -> CoreResult<bool> {
        Ok(self.repository.exists_by_case_uuid(case_uuid.as_uuid())?)
    }

    /// Checks whether a record exists for the human-readable case id.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    pub fn exists_by_case_id(&self, case_id: &str) -> CoreResult<bool> {
        Ok(self.repository.exists_by_case_id(case_id)?)
    }

    /// Fetches the record for the case UUID.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CaseNotFound`] if no record exists, or an
    /// error if the repository or codec fails.
    pub fn fetch(&self, case_uuid: CaseId) -> CoreResult<CaseRecord> {
        let row = self
            .repository
            .find_by_case_uuid(case_uuid.as_uuid())?
            .ok_or_else(|| CoreError::case_not_found(case_uuid))?;
        self.decode_row(row)
    }

    /// Fetches the record for the human-readable case id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CaseNotFound`] if no record exists, or an
    /// error if the repository or codec fails.
    pub fn fetch_by_case_id(&self, case_id: &str) -> CoreResult<CaseRecord> {
        let row = self
            .repository
            .find_by_case_id(case_id)?
            .ok_or_else(|| CoreError::case_not_found(case_id))?;
        self.decode_row(row)
    }

    /// Replaces the whole document of an existing case.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CaseNotFound`] if no record exists, or an
    /// error if the repository or codec fails.
    pub fn replace_document(&self, case_uuid: CaseId, document: Document) -> CoreResult<()> {
        let mut record = self.fetch(case_uuid)?;
        record.document = document;
        self.repository.save(self.encode_record(&record)?)?;
        Ok(())
    }

    /// Folds a flat map of segmented keys into the stored document.
    ///
    /// Each key is parsed into a path and expanded into a nested partial
    /// document; the partial is then deep-merged into the stored
    /// document. A missing record is created from the partial
    /// (upsert-create).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPath`] if any key fails to parse
    /// (checked before the store is touched), or an error if the
    /// repository or codec fails.
    pub fn upsert_merge<I>(&self, case_uuid: CaseId, values: I) -> CoreResult<CaseRecord>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        self.upsert(case_uuid, None, values)
    }

    /// [`DocumentStore::upsert_merge`], binding the human-readable case
    /// id when the record is first created.
    ///
    /// # Errors
    ///
    /// As for [`DocumentStore::upsert_merge`].
    pub fn upsert_merge_with_case_id<I>(
        &self,
        case_uuid: CaseId,
        case_id: impl Into<String>,
        values: I,
    ) -> CoreResult<CaseRecord>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        self.upsert(case_uuid, Some(case_id.into()), values)
    }

    /// Writes one value at a segmented path.
    ///
    /// The whole record is fetched, mutated in memory and stored back.
    /// Unlike [`DocumentStore::upsert_merge`], a missing record is an
    /// error rather than an implicit create.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPath`] for a malformed key,
    /// [`CoreError::CaseNotFound`] if no record exists, or an error if
    /// the repository or codec fails.
    pub fn write_at_path(&self, case_uuid: CaseId, key: &str, value: Value) -> CoreResult<()> {
        let path = KeyPath::parse(key)?;
        let mut record = self.fetch(case_uuid)?;
        debug!(%case_uuid, %path, "writing value at path");
        set_nested(&mut record.document, &path, value);
        self.repository.save(self.encode_record(&record)?)?;
        Ok(())
    }

    /// Reads the value at a segmented path.
    ///
    /// An absent path (including a type-mismatched intermediate) is
    /// `Ok(None)`; a stored null is `Ok(Some(Value::Null))`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPath`] for a malformed key,
    /// [`CoreError::CaseNotFound`] if no record exists, or an error if
    /// the repository or codec fails.
    pub fn read_at_path(&self, case_uuid: CaseId, key: &str) -> CoreResult<Option<Value>> {
        let path = KeyPath::parse(key)?;
        let record = self.fetch(case_uuid)?;
        Ok(get_nested(&record.document, &path).cloned())
    }

    /// Deletes the record for the case UUID. Missing records are a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    pub fn delete(&self, case_uuid: CaseId) -> CoreResult<()> {
        debug!(%case_uuid, "deleting case document");
        Ok(self.repository.delete_by_case_uuid(case_uuid.as_uuid())?)
    }

    /// Deletes the record for the human-readable case id. Missing
    /// records are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    pub fn delete_by_case_id(&self, case_id: &str) -> CoreResult<()> {
        debug!(case_id, "deleting case document");
        Ok(self.repository.delete_by_case_id(case_id)?)
    }

    /// Reacts to an upstream creation trigger by seeding an empty
    /// document keyed by the event's identifiers.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository or codec fails.
    pub fn seed_from_event(&self, event: &CaseCreatedEvent) -> CoreResult<CaseRecord> {
        self.create_record(event.case_uuid, event.case_id.clone())
    }

    fn create_record(
        &self,
        case_uuid: CaseId,
        case_id: Option<String>,
    ) -> CoreResult<CaseRecord> {
        if let Some(row) = self.repository.find_by_case_uuid(case_uuid.as_uuid())? {
            return self.decode_row(row);
        }
        debug!(%case_uuid, "seeding empty case document");
        let record = CaseRecord::empty(case_uuid, case_id);
        self.repository.save(self.encode_record(&record)?)?;
        Ok(record)
    }

    fn upsert<I>(
        &self,
        case_uuid: CaseId,
        case_id: Option<String>,
        values: I,
    ) -> CoreResult<CaseRecord>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let partial = expand_flat(values)?;
        debug!(%case_uuid, keys = partial.len(), "writing case data");

        match self.repository.find_by_case_uuid(case_uuid.as_uuid())? {
            Some(row) => {
                let mut record = self.decode_row(row)?;
                record.document = deep_merge(&record.document, &partial);
                if record.case_id.is_none() {
                    record.case_id = case_id;
                }
                debug!(%case_uuid, "writing merged case document");
                self.repository.save(self.encode_record(&record)?)?;
                Ok(record)
            }
            None => {
                let record = CaseRecord {
                    case_uuid,
                    case_id,
                    document: partial,
                };
                self.repository.save(self.encode_record(&record)?)?;
                Ok(record)
            }
        }
    }

    fn decode_row(&self, row: CaseRow) -> CoreResult<CaseRecord> {
        let document = match row.document {
            Some(text) => from_json_text_with(&text, &self.config.decode)?,
            None => Document::new(),
        };
        Ok(CaseRecord {
            case_uuid: CaseId::from_uuid(row.case_uuid),
            case_id: row.case_id,
            document,
        })
    }

    fn encode_record(&self, record: &CaseRecord) -> CoreResult<CaseRow> {
        // An empty document is persisted as an absent column, not "{}".
        let document = if record.document.is_empty() {
            None
        } else {
            Some(to_json_text(&record.document)?)
        };
        Ok(CaseRow {
            case_uuid: record.case_uuid.to_uuid(),
            case_id: record.case_id.clone(),
            document,
        })
    }
}

/// Expands a flat map of segmented keys into a nested partial document.
fn expand_flat<I>(values: I) -> CoreResult<Document>
where
    I: IntoIterator<Item = (String, Value)>,
{
    let mut partial = Document::new();
    for (key, value) in values {
        let path = KeyPath::parse(&key)?;
        set_nested(&mut partial, &path, value);
    }
    Ok(partial)
}
