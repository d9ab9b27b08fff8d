//! Key parsing and normalization.

use crate::error::{CoreError, CoreResult};
use std::fmt;

/// Canonical separator between path segments.
pub const SEPARATOR: char = '/';

/// Alternate separator used by the form layer, normalized to
/// [`SEPARATOR`] before splitting.
pub const FORM_SEPARATOR: char = '.';

/// An ordered, non-empty sequence of segments addressing a location
/// inside a case document.
///
/// A path is derived from a raw key by rewriting the form-layer
/// separator to the canonical one, stripping a single leading canonical
/// separator (absolute-looking keys are tolerated) and splitting on the
/// canonical separator. Parsing never touches the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Parses a raw key into a path.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPath`] if the key is empty, reduces
    /// to no segments, or contains an empty segment (consecutive
    /// separators).
    pub fn parse(raw: &str) -> CoreResult<Self> {
        if raw.is_empty() {
            return Err(CoreError::invalid_path(raw, "key is empty"));
        }

        let normalized = raw.replace(FORM_SEPARATOR, "/");
        let normalized = normalized.strip_prefix(SEPARATOR).unwrap_or(&normalized);
        if normalized.is_empty() {
            return Err(CoreError::invalid_path(raw, "key has no segments"));
        }

        let mut segments = Vec::new();
        for segment in normalized.split(SEPARATOR) {
            if segment.is_empty() {
                return Err(CoreError::invalid_path(raw, "empty segment"));
            }
            segments.push(segment.to_string());
        }

        Ok(Self { segments })
    }

    /// Returns the segments in order. Always at least one.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; kept for the conventional pair with [`KeyPath::len`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}
