//! # Casedoc Codec
//!
//! Value model and canonical JSON codec for Casedoc.
//!
//! This crate defines the closed value variant a case document is built
//! from, the insertion-ordered [`Document`] mapping, and the JSON text
//! contract used to persist documents as an opaque column:
//!
//! - Encoding is canonical: compact output, keys in insertion order, so
//!   identical documents produce identical text.
//! - Decoding is lenient: blank input is an empty document, any JSON
//!   shape below the root is accepted, and number literals that do not
//!   fit an `i64` are kept verbatim instead of being rounded through a
//!   binary float.
//! - Deployment modes that need it can rewrite camelCase keys to
//!   snake_case at decode time via [`DecodeOptions`].
//!
//! ## Usage
//!
//! ```
//! use casedoc_codec::{from_json_text, to_json_text, Document, Value};
//!
//! let mut doc = Document::new();
//! doc.insert("name", Value::from("alice"));
//!
//! let text = to_json_text(&doc).unwrap();
//! assert_eq!(text, r#"{"name":"alice"}"#);
//! assert_eq!(from_json_text(&text).unwrap(), doc);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod decoder;
mod encoder;
mod error;
mod value;

pub use decoder::{from_json_text, from_json_text_with, DecodeOptions, KeyStyle};
pub use encoder::{to_json_text, JsonEncoder};
pub use error::{CodecError, CodecResult};
pub use value::{Document, Value};

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(doc: &Document) -> Document {
        let text = to_json_text(doc).unwrap();
        from_json_text(&text).unwrap()
    }

    #[test]
    fn roundtrip_empty() {
        assert_eq!(roundtrip(&Document::new()), Document::new());
    }

    #[test]
    fn roundtrip_scalars() {
        let mut doc = Document::new();
        doc.insert("text", Value::from("hello world"));
        doc.insert("int", Value::Integer(-42));
        doc.insert("flag", Value::Bool(true));
        doc.insert("nothing", Value::Null);
        assert_eq!(roundtrip(&doc), doc);
    }

    #[test]
    fn roundtrip_decimal() {
        let mut doc = Document::new();
        doc.insert("precise", Value::decimal("0.10000000000000000000000001"));
        assert_eq!(roundtrip(&doc), doc);
    }

    #[test]
    fn roundtrip_nested() {
        let mut address = Document::new();
        address.insert("city", Value::from("Delft"));
        address.insert("number", Value::Integer(12));

        let mut doc = Document::new();
        doc.insert("name", Value::from("alice"));
        doc.insert("address", Value::Map(address));
        doc.insert(
            "tags",
            Value::Array(vec![Value::from("a"), Value::Null, Value::Integer(3)]),
        );

        assert_eq!(roundtrip(&doc), doc);
    }

    #[test]
    fn roundtrip_preserves_null_vs_absent() {
        let mut doc = Document::new();
        doc.insert("present_null", Value::Null);

        let back = roundtrip(&doc);
        assert_eq!(back.get("present_null"), Some(&Value::Null));
        assert_eq!(back.get("absent"), None);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn value_strategy() -> impl Strategy<Value = Value> + Clone {
            let leaf = prop_oneof![
                Just(Value::Null),
                any::<bool>().prop_map(Value::Bool),
                any::<i64>().prop_map(Value::Integer),
                "[a-z0-9 ]{0,12}".prop_map(Value::Text),
                (1u64..10_000, 1u64..1_000)
                    .prop_map(|(a, b)| Value::decimal(format!("{a}.{b:03}"))),
            ];
            leaf.prop_recursive(3, 24, 4, |inner| {
                prop_oneof![
                    prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                    document_entries(inner).prop_map(Value::Map),
                ]
            })
        }

        fn document_entries(
            value: impl Strategy<Value = Value> + Clone,
        ) -> impl Strategy<Value = Document> {
            prop::collection::vec(("[a-z]{1,6}", value), 0..4)
                .prop_map(|pairs| pairs.into_iter().collect())
        }

        proptest! {
            #[test]
            fn encode_decode_roundtrip(doc in document_entries(value_strategy())) {
                let text = to_json_text(&doc).unwrap();
                let back = from_json_text(&text).unwrap();
                prop_assert_eq!(back, doc);
            }
        }
    }
}
