//! Document store configuration.

use casedoc_codec::{DecodeOptions, KeyStyle};

/// Configuration for a [`crate::DocumentStore`].
///
/// # Example
///
/// ```rust
/// use casedoc_codec::KeyStyle;
/// use casedoc_core::StoreConfig;
///
/// let config = StoreConfig::default().key_style(KeyStyle::SnakeCase);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreConfig {
    /// Options applied when decoding stored document text.
    pub decode: DecodeOptions,
}

impl StoreConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field-name convention applied while decoding.
    ///
    /// Deployment modes fed by camelCase upstream payloads use
    /// [`KeyStyle::SnakeCase`] to store one consistent convention.
    #[must_use]
    pub fn key_style(mut self, style: KeyStyle) -> Self {
        self.decode.key_style = style;
        self
    }
}
