//! JSON decoder with configurable leniency.

use crate::error::{CodecError, CodecResult};
use crate::value::{Document, Value};

/// Field-name convention applied to mapping keys while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyStyle {
    /// Keep keys exactly as they appear in the input.
    #[default]
    Preserve,
    /// Rewrite camelCase keys to snake_case, recursively.
    SnakeCase,
}

/// Options controlling how JSON text is decoded into a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    /// Field-name convention translation.
    pub key_style: KeyStyle,
}

impl DecodeOptions {
    /// Creates the default options (keys preserved verbatim).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key style.
    #[must_use]
    pub fn key_style(mut self, style: KeyStyle) -> Self {
        self.key_style = style;
        self
    }
}

/// Decode JSON text into a document with default options.
///
/// Blank or whitespace-only input yields an empty document rather than
/// failing; a persisted NULL column is handled the same way by callers.
///
/// # Errors
///
/// Returns an error if the text is not valid JSON or the root is not an
/// object.
pub fn from_json_text(text: &str) -> CodecResult<Document> {
    from_json_text_with(text, &DecodeOptions::default())
}

/// Decode JSON text into a document.
///
/// Any well-formed JSON structure below the root is accepted as data;
/// numbers keep their exact literal when they do not fit an `i64`, so
/// high-precision decimals survive the round trip without floating-point
/// rounding.
///
/// # Errors
///
/// Returns an error if the text is not valid JSON or the root is not an
/// object.
pub fn from_json_text_with(text: &str, options: &DecodeOptions) -> CodecResult<Document> {
    if text.trim().is_empty() {
        return Ok(Document::new());
    }

    let parsed: serde_json::Value =
        serde_json::from_str(text).map_err(|e| CodecError::decoding_failed(e.to_string()))?;

    match parsed {
        serde_json::Value::Object(map) => convert_object(map, options),
        other => Err(CodecError::non_object_root(json_type_name(&other))),
    }
}

fn convert_object(
    map: serde_json::Map<String, serde_json::Value>,
    options: &DecodeOptions,
) -> CodecResult<Document> {
    let mut document = Document::new();
    for (key, value) in map {
        let key = match options.key_style {
            KeyStyle::Preserve => key,
            KeyStyle::SnakeCase => snake_case(&key),
        };
        document.insert(key, convert_value(value, options)?);
    }
    Ok(document)
}

fn convert_value(value: serde_json::Value, options: &DecodeOptions) -> CodecResult<Value> {
    Ok(match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => convert_number(&n),
        serde_json::Value::String(s) => Value::Text(s),
        serde_json::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| convert_value(item, options))
                .collect::<CodecResult<Vec<_>>>()?,
        ),
        serde_json::Value::Object(map) => Value::Map(convert_object(map, options)?),
    })
}

fn convert_number(n: &serde_json::Number) -> Value {
    match n.as_i64() {
        Some(i) => Value::Integer(i),
        // Out of i64 range or fractional: keep the exact literal.
        None => Value::Decimal(n.to_string()),
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Rewrites a camelCase key to snake_case.
///
/// An underscore is inserted before an uppercase letter that follows a
/// lowercase letter or digit; keys that are already snake_case come
/// through unchanged.
fn snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut prev_lower_or_digit = false;
    for ch in key.chars() {
        if ch.is_uppercase() {
            if prev_lower_or_digit {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
            prev_lower_or_digit = false;
        } else {
            prev_lower_or_digit = ch.is_lowercase() || ch.is_ascii_digit();
            out.push(ch);
        }
    }
    out
}
