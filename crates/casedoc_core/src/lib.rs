//! # Casedoc Core
//!
//! Per-case nested-path document store.
//!
//! Every tracked case owns exactly one semi-structured document,
//! addressed by segmented paths, with partial reads, partial writes and
//! recursive merge-on-update. This crate provides:
//!
//! - Key parsing and normalization ([`KeyPath`])
//! - The nested accessor ([`get_nested`] / [`set_nested`])
//! - Recursive document merge ([`deep_merge`])
//! - The [`DocumentStore`] over a [`casedoc_storage::CaseRepository`]
//! - The case-created event hub and the field-resolution boundary
//!
//! ## Usage
//!
//! ```
//! use casedoc_codec::Value;
//! use casedoc_core::{CaseId, DocumentStore};
//! use casedoc_storage::InMemoryRepository;
//!
//! let store = DocumentStore::new(InMemoryRepository::new());
//! let id = CaseId::new();
//!
//! store.upsert_merge(id, vec![
//!     ("person.name".to_string(), Value::from("alice")),
//!     ("person.age".to_string(), Value::Integer(34)),
//! ]).unwrap();
//!
//! assert_eq!(
//!     store.read_at_path(id, "person.name").unwrap(),
//!     Some(Value::from("alice")),
//! );
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod case;
mod config;
mod error;
mod events;
mod merge;
mod nested;
mod path;
mod resolver;
mod store;

pub use case::{CaseId, CaseRecord};
pub use config::StoreConfig;
pub use error::{CoreError, CoreResult};
pub use events::{CaseCreatedEvent, CaseEventHub};
pub use merge::deep_merge;
pub use nested::{get_nested, set_nested};
pub use path::{KeyPath, FORM_SEPARATOR, SEPARATOR};
pub use resolver::{
    CaseDocumentResolverFactory, CaseLink, CaseLinkResolver, ValueResolverFactory, PREFIX,
};
pub use store::DocumentStore;

// The value model is part of this crate's public surface.
pub use casedoc_codec::{Document, Value};
