//! Case identifier.

use crate::error::{CoreError, CoreResult};
use std::fmt;
use uuid::Uuid;

/// Primary identifier of a case.
///
/// Case IDs are UUIDs that are:
/// - Unique within a store
/// - Immutable once a record is created
/// - Never reused
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CaseId(Uuid);

impl CaseId {
    /// Creates a new random case ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a case ID from a UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parses a case ID from its textual UUID form.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCaseUuid`] if the string is not a
    /// valid UUID.
    pub fn parse(value: &str) -> CoreResult<Self> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| CoreError::invalid_case_uuid(value))
    }

    /// Returns the underlying UUID.
    #[inline]
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Converts to the underlying UUID.
    #[must_use]
    pub const fn to_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for CaseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CaseId({})", self.0)
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for CaseId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<CaseId> for Uuid {
    fn from(id: CaseId) -> Self {
        id.0
    }
}
