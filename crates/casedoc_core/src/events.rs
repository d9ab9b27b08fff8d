//! Case lifecycle events.
//!
//! The store never originates events; an external system announces that
//! a case came into existence and the subscriber side seeds an empty
//! document for it (see [`crate::DocumentStore::seed_from_event`]).

use crate::case::CaseId;
use parking_lot::RwLock;
use std::sync::mpsc::{self, Receiver, Sender};

/// Announcement that a case was created upstream.
///
/// Carries the upstream identifiers: the case UUID and, where the
/// deployment mode provides one, the human-readable case id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseCreatedEvent {
    /// Primary key of the new case.
    pub case_uuid: CaseId,
    /// Optional human-readable secondary key.
    pub case_id: Option<String>,
}

impl CaseCreatedEvent {
    /// Creates an event for a case known only by UUID.
    #[must_use]
    pub fn new(case_uuid: CaseId) -> Self {
        Self {
            case_uuid,
            case_id: None,
        }
    }

    /// Creates an event carrying both upstream identifiers.
    #[must_use]
    pub fn with_case_id(case_uuid: CaseId, case_id: impl Into<String>) -> Self {
        Self {
            case_uuid,
            case_id: Some(case_id.into()),
        }
    }
}

/// Distributes case-created events to subscribers.
///
/// - Supports multiple subscribers
/// - Preserves emission order per subscriber
/// - Is thread-safe
pub struct CaseEventHub {
    subscribers: RwLock<Vec<Sender<CaseCreatedEvent>>>,
}

impl CaseEventHub {
    /// Creates a new hub with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Subscribes to future events.
    ///
    /// Returns a receiver that will see every event emitted after this
    /// call. The receiver should be polled regularly.
    pub fn subscribe(&self) -> Receiver<CaseCreatedEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.write().push(tx);
        rx
    }

    /// Emits an event to all subscribers.
    ///
    /// Disconnected subscribers are pruned.
    pub fn emit(&self, event: CaseCreatedEvent) {
        let mut subscribers = self.subscribers.write();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Returns the number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl Default for CaseEventHub {
    fn default() -> Self {
        Self::new()
    }
}
