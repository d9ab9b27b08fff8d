//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during encoding or decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Failed to encode a document to JSON text.
    #[error("encoding failed: {message}")]
    EncodingFailed {
        /// Description of the encoding error.
        message: String,
    },

    /// Failed to decode JSON text.
    #[error("decoding failed: {message}")]
    DecodingFailed {
        /// Description of the decoding error.
        message: String,
    },

    /// The document root was not a JSON object.
    #[error("document root must be a JSON object, got {found}")]
    NonObjectRoot {
        /// The JSON type that was found instead.
        found: String,
    },

    /// A decimal value does not hold a valid JSON number literal.
    #[error("invalid number literal: {literal:?}")]
    InvalidNumber {
        /// The offending literal.
        literal: String,
    },

    /// The document nests deeper than the encoder allows.
    #[error("document nests deeper than {limit} levels")]
    NestingTooDeep {
        /// The depth limit that was exceeded.
        limit: usize,
    },
}

impl CodecError {
    /// Create an encoding failed error.
    pub fn encoding_failed(message: impl Into<String>) -> Self {
        Self::EncodingFailed {
            message: message.into(),
        }
    }

    /// Create a decoding failed error.
    pub fn decoding_failed(message: impl Into<String>) -> Self {
        Self::DecodingFailed {
            message: message.into(),
        }
    }

    /// Create a non-object-root error.
    pub fn non_object_root(found: impl Into<String>) -> Self {
        Self::NonObjectRoot {
            found: found.into(),
        }
    }

    /// Create an invalid number error.
    pub fn invalid_number(literal: impl Into<String>) -> Self {
        Self::InvalidNumber {
            literal: literal.into(),
        }
    }
}
