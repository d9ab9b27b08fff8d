//! # Casedoc Storage
//!
//! Case repository trait and implementations for Casedoc.
//!
//! This crate provides the persistence collaborator boundary of the
//! document store. Repositories are **opaque row stores**: one row per
//! case, keyed by an immutable UUID with an optional unique
//! human-readable case id, the document column carried as uninterpreted
//! JSON text (`None` for an empty document). All document semantics live
//! above this crate.
//!
//! ## Available repositories
//!
//! - [`InMemoryRepository`] - For testing and ephemeral stores
//! - [`FileRepository`] - For durable single-process deployments
//!
//! ## Example
//!
//! ```rust
//! use casedoc_storage::{CaseRepository, CaseRow, InMemoryRepository};
//! use uuid::Uuid;
//!
//! let repository = InMemoryRepository::new();
//! let id = Uuid::new_v4();
//! repository.save(CaseRow::empty(id, Some("CASE-001".into()))).unwrap();
//! assert!(repository.exists_by_case_id("CASE-001").unwrap());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;
mod memory;
mod repository;

pub use error::{RepositoryError, RepositoryResult};
pub use file::FileRepository;
pub use memory::InMemoryRepository;
pub use repository::{CaseRepository, CaseRow};
