//! Field-resolution boundary for the form/workflow layer.
//!
//! The outer layer addresses values by a short textual prefix plus a
//! segmented key, and knows cases only through its own document ids.
//! This module exposes exactly two operations to that layer, a single
//! path read and a batch submit, and leaves the document-id-to-case
//! mapping to a [`CaseLinkResolver`] the caller provides.

use crate::case::CaseId;
use crate::error::CoreResult;
use crate::store::DocumentStore;
use casedoc_codec::Value;
use casedoc_storage::CaseRepository;
use std::sync::Arc;
use tracing::debug;

/// Prefix under which case document fields are resolved.
pub const PREFIX: &str = "cdoc";

/// The case a workflow document id is linked to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseLink {
    /// Primary key of the linked case.
    pub case_uuid: CaseId,
    /// Optional human-readable secondary key from the upstream system.
    pub case_id: Option<String>,
}

/// Maps a workflow document id to its linked case.
///
/// Implemented by the surrounding system (instance links, upstream
/// plugin lookups); the core only consumes the resulting link.
pub trait CaseLinkResolver: Send + Sync {
    /// Resolves the case linked to `document_id`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::CaseNotFound`] if no case is linked.
    fn resolve(&self, document_id: &str) -> CoreResult<CaseLink>;
}

/// A prefix-keyed resolver over case documents.
pub trait ValueResolverFactory {
    /// The prefix this factory answers for.
    fn supported_prefix(&self) -> &str;

    /// Resolves one value by segmented key for a workflow document.
    ///
    /// # Errors
    ///
    /// Returns an error if the link lookup, path parsing or store access
    /// fails. An absent path is `Ok(None)`.
    fn resolve_value(&self, document_id: &str, requested_key: &str)
        -> CoreResult<Option<Value>>;

    /// Submits a batch of segmented-key values for a workflow document.
    ///
    /// # Errors
    ///
    /// Returns an error if the link lookup, path parsing or store access
    /// fails.
    fn handle_values(
        &self,
        document_id: &str,
        values: Vec<(String, Value)>,
    ) -> CoreResult<()>;
}

/// Resolves case document fields through a [`DocumentStore`].
pub struct CaseDocumentResolverFactory<R, L> {
    store: Arc<DocumentStore<R>>,
    links: L,
}

impl<R, L> CaseDocumentResolverFactory<R, L> {
    /// Creates a factory over a shared store and a link resolver.
    pub fn new(store: Arc<DocumentStore<R>>, links: L) -> Self {
        Self { store, links }
    }
}

impl<R, L> ValueResolverFactory for CaseDocumentResolverFactory<R, L>
where
    R: CaseRepository,
    L: CaseLinkResolver,
{
    fn supported_prefix(&self) -> &str {
        PREFIX
    }

    fn resolve_value(
        &self,
        document_id: &str,
        requested_key: &str,
    ) -> CoreResult<Option<Value>> {
        debug!(document_id, requested_key, "resolving case document value");
        let link = self.links.resolve(document_id)?;
        self.store.read_at_path(link.case_uuid, requested_key)
    }

    fn handle_values(
        &self,
        document_id: &str,
        values: Vec<(String, Value)>,
    ) -> CoreResult<()> {
        let link = self.links.resolve(document_id)?;
        match link.case_id {
            Some(case_id) => {
                self.store
                    .upsert_merge_with_case_id(link.case_uuid, case_id, values)?;
            }
            None => {
                self.store.upsert_merge(link.case_uuid, values)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use casedoc_storage::InMemoryRepository;
    use std::collections::HashMap;

    struct StaticLinks {
        links: HashMap<String, CaseLink>,
    }

    impl CaseLinkResolver for StaticLinks {
        fn resolve(&self, document_id: &str) -> CoreResult<CaseLink> {
            self.links
                .get(document_id)
                .cloned()
                .ok_or_else(|| CoreError::case_not_found(document_id))
        }
    }

    fn factory(
        link: CaseLink,
    ) -> CaseDocumentResolverFactory<InMemoryRepository, StaticLinks> {
        let store = Arc::new(DocumentStore::new(InMemoryRepository::new()));
        let mut links = HashMap::new();
        links.insert("doc-1".to_string(), link);
        CaseDocumentResolverFactory::new(store, StaticLinks { links })
    }

    #[test]
    fn prefix_is_stable() {
        let f = factory(CaseLink {
            case_uuid: CaseId::new(),
            case_id: None,
        });
        assert_eq!(f.supported_prefix(), "cdoc");
    }

    #[test]
    fn handle_values_then_resolve_value() {
        let case_uuid = CaseId::new();
        let f = factory(CaseLink {
            case_uuid,
            case_id: Some("CASE-001".to_string()),
        });

        f.handle_values(
            "doc-1",
            vec![("person.name".to_string(), Value::from("alice"))],
        )
        .unwrap();

        assert_eq!(
            f.resolve_value("doc-1", "person.name").unwrap(),
            Some(Value::from("alice"))
        );
        assert_eq!(f.resolve_value("doc-1", "person.age").unwrap(), None);
    }

    #[test]
    fn handle_values_binds_the_upstream_case_id() {
        let case_uuid = CaseId::new();
        let f = factory(CaseLink {
            case_uuid,
            case_id: Some("CASE-001".to_string()),
        });

        f.handle_values("doc-1", vec![("a".to_string(), Value::Integer(1))])
            .unwrap();

        let record = f.store.fetch_by_case_id("CASE-001").unwrap();
        assert_eq!(record.case_uuid, case_uuid);
    }

    #[test]
    fn unknown_document_id_is_an_error() {
        let f = factory(CaseLink {
            case_uuid: CaseId::new(),
            case_id: None,
        });
        let err = f.resolve_value("doc-404", "a").unwrap_err();
        assert!(matches!(err, CoreError::CaseNotFound { .. }));
    }
}
