//! Canonical JSON encoder.

use crate::error::{CodecError, CodecResult};
use crate::value::{Document, Value};

/// Maximum nesting depth the encoder will serialize.
///
/// Documents are owned trees, so a cycle is unrepresentable; the guard
/// bounds stack use on pathologically deep (but finite) documents.
const MAX_DEPTH: usize = 128;

/// Encode a document to canonical JSON text.
///
/// The output is compact (no insignificant whitespace) and emits mapping
/// keys in insertion order, so identical documents produce identical
/// text. The empty document encodes to `"{}"`, which is distinct from
/// the JSON literal `null`.
///
/// # Errors
///
/// Returns an error if a decimal value holds an invalid number literal
/// or the document exceeds the nesting limit.
pub fn to_json_text(document: &Document) -> CodecResult<String> {
    let mut encoder = JsonEncoder::new();
    encoder.encode_document(document)?;
    Ok(encoder.into_text())
}

/// A canonical JSON encoder.
///
/// Produces deterministic JSON text suitable for storing as the opaque
/// document column of a case record.
#[derive(Debug, Default)]
pub struct JsonEncoder {
    buffer: String,
}

impl JsonEncoder {
    /// Create a new encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new encoder with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    /// Encode a document into the buffer.
    pub fn encode_document(&mut self, document: &Document) -> CodecResult<()> {
        self.write_map(document, 0)
    }

    /// Consume this encoder and return the encoded text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.buffer
    }

    /// Get a reference to the encoded text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn write_value(&mut self, value: &Value, depth: usize) -> CodecResult<()> {
        match value {
            Value::Null => {
                self.buffer.push_str("null");
                Ok(())
            }
            Value::Bool(b) => {
                self.buffer.push_str(if *b { "true" } else { "false" });
                Ok(())
            }
            Value::Integer(n) => {
                self.buffer.push_str(&n.to_string());
                Ok(())
            }
            Value::Decimal(literal) => self.write_decimal(literal),
            Value::Text(s) => {
                self.write_string(s);
                Ok(())
            }
            Value::Array(items) => self.write_array(items, depth),
            Value::Map(map) => self.write_map(map, depth),
        }
    }

    fn write_map(&mut self, map: &Document, depth: usize) -> CodecResult<()> {
        if depth >= MAX_DEPTH {
            return Err(CodecError::NestingTooDeep { limit: MAX_DEPTH });
        }
        self.buffer.push('{');
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 {
                self.buffer.push(',');
            }
            self.write_string(key);
            self.buffer.push(':');
            self.write_value(value, depth + 1)?;
        }
        self.buffer.push('}');
        Ok(())
    }

    fn write_array(&mut self, items: &[Value], depth: usize) -> CodecResult<()> {
        if depth >= MAX_DEPTH {
            return Err(CodecError::NestingTooDeep { limit: MAX_DEPTH });
        }
        self.buffer.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.buffer.push(',');
            }
            self.write_value(item, depth + 1)?;
        }
        self.buffer.push(']');
        Ok(())
    }

    fn write_decimal(&mut self, literal: &str) -> CodecResult<()> {
        if !is_json_number(literal) {
            return Err(CodecError::invalid_number(literal));
        }
        self.buffer.push_str(literal);
        Ok(())
    }

    fn write_string(&mut self, s: &str) {
        self.buffer.push('"');
        for ch in s.chars() {
            match ch {
                '"' => self.buffer.push_str("\\\""),
                '\\' => self.buffer.push_str("\\\\"),
                '\n' => self.buffer.push_str("\\n"),
                '\r' => self.buffer.push_str("\\r"),
                '\t' => self.buffer.push_str("\\t"),
                '\u{8}' => self.buffer.push_str("\\b"),
                '\u{c}' => self.buffer.push_str("\\f"),
                c if (c as u32) < 0x20 => {
                    self.buffer.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => self.buffer.push(c),
            }
        }
        self.buffer.push('"');
    }
}

/// Checks a string against the JSON number grammar.
///
/// Grammar: `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
fn is_json_number(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut pos = 0;

    if bytes.first() == Some(&b'-') {
        pos += 1;
    }

    // Integer part: 0, or a non-zero digit followed by digits
    match bytes.get(pos) {
        Some(b'0') => pos += 1,
        Some(b'1'..=b'9') => {
            pos += 1;
            while matches!(bytes.get(pos), Some(b'0'..=b'9')) {
                pos += 1;
            }
        }
        _ => return false,
    }

    // Fraction part
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        if !matches!(bytes.get(pos), Some(b'0'..=b'9')) {
            return false;
        }
        while matches!(bytes.get(pos), Some(b'0'..=b'9')) {
            pos += 1;
        }
    }

    // Exponent part
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        if !matches!(bytes.get(pos), Some(b'0'..=b'9')) {
            return false;
        }
        while matches!(bytes.get(pos), Some(b'0'..=b'9')) {
            pos += 1;
        }
    }

    pos == bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(pairs: Vec<(&str, Value)>) -> Document {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn empty_document_encodes_to_braces() {
        assert_eq!(to_json_text(&Document::new()).unwrap(), "{}");
    }

    #[test]
    fn scalars_encode_compactly() {
        let d = doc(vec![
            ("s", Value::from("hi")),
            ("i", Value::Integer(-7)),
            ("b", Value::Bool(true)),
            ("n", Value::Null),
        ]);
        assert_eq!(
            to_json_text(&d).unwrap(),
            r#"{"s":"hi","i":-7,"b":true,"n":null}"#
        );
    }

    #[test]
    fn insertion_order_is_preserved() {
        let d = doc(vec![
            ("z", Value::Integer(1)),
            ("a", Value::Integer(2)),
            ("m", Value::Integer(3)),
        ]);
        assert_eq!(to_json_text(&d).unwrap(), r#"{"z":1,"a":2,"m":3}"#);
    }

    #[test]
    fn decimal_literal_is_emitted_verbatim() {
        let d = doc(vec![(
            "amount",
            Value::decimal("123456789.123456789123456789"),
        )]);
        assert_eq!(
            to_json_text(&d).unwrap(),
            r#"{"amount":123456789.123456789123456789}"#
        );
    }

    #[test]
    fn invalid_decimal_is_rejected() {
        let d = doc(vec![("bad", Value::decimal("1.2.3"))]);
        assert_eq!(
            to_json_text(&d),
            Err(CodecError::invalid_number("1.2.3"))
        );
    }

    #[test]
    fn strings_are_escaped() {
        let d = doc(vec![("k", Value::from("a\"b\\c\nd\u{1}"))]);
        assert_eq!(
            to_json_text(&d).unwrap(),
            r#"{"k":"a\"b\\c\nd\u0001"}"#
        );
    }

    #[test]
    fn nested_structures_encode() {
        let inner = doc(vec![("b", Value::Integer(1))]);
        let d = doc(vec![
            ("a", Value::Map(inner)),
            ("list", Value::from(vec![1i64, 2, 3])),
        ]);
        assert_eq!(
            to_json_text(&d).unwrap(),
            r#"{"a":{"b":1},"list":[1,2,3]}"#
        );
    }

    #[test]
    fn depth_limit_is_enforced() {
        let mut d = Document::new();
        for _ in 0..200 {
            let mut outer = Document::new();
            outer.insert("x", Value::Map(d));
            d = outer;
        }
        assert!(matches!(
            to_json_text(&d),
            Err(CodecError::NestingTooDeep { .. })
        ));
    }

    #[test]
    fn number_grammar() {
        for ok in ["0", "-0", "7", "-12", "3.14", "0.5", "1e9", "1.5E-10", "2e+3"] {
            assert!(is_json_number(ok), "{ok} should be accepted");
        }
        for bad in ["", "-", "01", ".5", "1.", "1e", "+1", "1f", "NaN", "Infinity"] {
            assert!(!is_json_number(bad), "{bad} should be rejected");
        }
    }
}
