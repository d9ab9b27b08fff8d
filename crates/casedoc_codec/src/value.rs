//! Dynamic JSON value type and the insertion-ordered document mapping.

use std::fmt;

/// A dynamic JSON value.
///
/// This type represents any value a case document can hold. Numbers are
/// split into [`Value::Integer`] for anything that fits an `i64` and
/// [`Value::Decimal`] for everything else; a decimal keeps its exact
/// source literal so high-precision values never pass through binary
/// floating point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Null value. Stored nulls are distinct from absent keys.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer (full i64 range).
    Integer(i64),
    /// Arbitrary-precision number, kept as its JSON literal.
    Decimal(String),
    /// Text string (UTF-8).
    Text(String),
    /// Ordered list of values.
    Array(Vec<Value>),
    /// Nested mapping.
    Map(Document),
}

impl Value {
    /// Create a decimal value from a JSON number literal.
    ///
    /// The literal is not validated here; the encoder rejects anything
    /// that is not a valid JSON number.
    pub fn decimal(literal: impl Into<String>) -> Self {
        Value::Decimal(literal.into())
    }

    /// Check if this value is null.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get this value as a boolean, if it is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get this value as an integer, if it is one.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value's decimal literal, if it is a decimal.
    #[must_use]
    pub fn as_decimal(&self) -> Option<&str> {
        match self {
            Value::Decimal(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as a string, if it is a text string.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as an array, if it is one.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Get this value as a mapping, if it is one.
    #[must_use]
    pub fn as_map(&self) -> Option<&Document> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Get this value as a mutable mapping, if it is one.
    pub fn as_map_mut(&mut self) -> Option<&mut Document> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Look up a key if this value is a mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(m) => m.get(key),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Map(doc)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Null
    }
}

/// An insertion-ordered mapping from string keys to values.
///
/// `Document` is the mapping used both at the root of a case document and
/// for every nested mapping inside it. Keys are unique at each level;
/// inserting an existing key replaces the value in place, so the key
/// keeps its original position and serialization stays deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    entries: Vec<(String, Value)>,
}

impl Document {
    /// Creates a new empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of keys at this level.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if this mapping has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a key at this level.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Looks up a key at this level, mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Checks whether a key is present at this level.
    ///
    /// A key holding [`Value::Null`] is present; absence and null are
    /// distinct outcomes.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Inserts a key-value pair, returning the previous value if any.
    ///
    /// An existing key keeps its position (last write wins in place); a
    /// new key is appended.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => Some(std::mem::replace(&mut entry.1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Removes a key, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterates over key-value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut doc = Document::new();
        for (key, value) in iter {
            doc.insert(key, value);
        }
        doc
    }
}

impl Extend<(String, Value)> for Document {
    fn extend<I: IntoIterator<Item = (String, Value)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, Value)>,
        fn(&'a (String, Value)) -> (&'a String, &'a Value),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k:?}: {v:?}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_preserves_position_on_overwrite() {
        let mut doc = Document::new();
        doc.insert("a", Value::Integer(1));
        doc.insert("b", Value::Integer(2));
        doc.insert("a", Value::Integer(99));

        let keys: Vec<_> = doc.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(doc.get("a"), Some(&Value::Integer(99)));
    }

    #[test]
    fn insert_returns_previous_value() {
        let mut doc = Document::new();
        assert_eq!(doc.insert("a", Value::Integer(1)), None);
        assert_eq!(doc.insert("a", Value::Integer(2)), Some(Value::Integer(1)));
    }

    #[test]
    fn null_is_present_absent_is_not() {
        let mut doc = Document::new();
        doc.insert("a", Value::Null);

        assert!(doc.contains_key("a"));
        assert_eq!(doc.get("a"), Some(&Value::Null));
        assert!(!doc.contains_key("b"));
        assert_eq!(doc.get("b"), None);
    }

    #[test]
    fn remove_returns_value() {
        let mut doc = Document::new();
        doc.insert("a", Value::Integer(1));
        assert_eq!(doc.remove("a"), Some(Value::Integer(1)));
        assert_eq!(doc.remove("a"), None);
        assert!(doc.is_empty());
    }

    #[test]
    fn from_iterator_last_write_wins() {
        let doc: Document = vec![
            ("a".to_string(), Value::Integer(1)),
            ("b".to_string(), Value::Integer(2)),
            ("a".to_string(), Value::Integer(3)),
        ]
        .into_iter()
        .collect();

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get("a"), Some(&Value::Integer(3)));
    }

    #[test]
    fn value_accessors() {
        assert!(Value::Null.is_null());
        assert!(!Value::Bool(true).is_null());

        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Integer(42).as_integer(), Some(42));
        assert_eq!(Value::decimal("3.14").as_decimal(), Some("3.14"));
        assert_eq!(Value::Text("hi".to_string()).as_text(), Some("hi"));
        assert_eq!(Value::Integer(42).as_text(), None);
    }

    #[test]
    fn value_get_traverses_maps_only() {
        let mut inner = Document::new();
        inner.insert("x", Value::Integer(1));
        let value = Value::Map(inner);

        assert_eq!(value.get("x"), Some(&Value::Integer(1)));
        assert_eq!(Value::Integer(1).get("x"), None);
    }

    #[test]
    fn from_impls() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42i64), Value::Integer(42));
        assert_eq!(Value::from(42i32), Value::Integer(42));
        assert_eq!(Value::from("hello"), Value::Text("hello".to_string()));
        assert_eq!(Value::from(vec![1i64, 2]), {
            Value::Array(vec![Value::Integer(1), Value::Integer(2)])
        });
        assert_eq!(Value::from(()), Value::Null);
    }
}
