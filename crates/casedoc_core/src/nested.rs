//! Nested accessor: reads and writes through a parsed path.

use crate::path::KeyPath;
use casedoc_codec::{Document, Value};

/// Reads the value addressed by `path`.
///
/// Descends one segment at a time. A missing key or a non-mapping value
/// at an intermediate segment is a normal "absent" outcome, never an
/// error. A stored null at the terminal segment is returned as
/// `Some(&Value::Null)`, distinct from `None`.
#[must_use]
pub fn get_nested<'a>(document: &'a Document, path: &KeyPath) -> Option<&'a Value> {
    let (last, intermediate) = path.segments().split_last()?;
    let mut current = document;
    for segment in intermediate {
        current = current.get(segment)?.as_map()?;
    }
    current.get(last)
}

/// Writes `value` at the location addressed by `path`, mutating the
/// document in place.
///
/// Intermediate segments descend into existing mappings; an absent key
/// or a non-mapping value is replaced by a fresh mapping and descended
/// into (path wins over a prior scalar). At the terminal segment a
/// mapping value is folded into an existing mapping key-by-key; any
/// other combination replaces the existing value outright, including
/// null in either direction.
pub fn set_nested(document: &mut Document, path: &KeyPath, value: Value) {
    set_in(document, path.segments(), value);
}

fn set_in(map: &mut Document, segments: &[String], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };

    if rest.is_empty() {
        match value {
            Value::Map(incoming) if matches!(map.get(head), Some(Value::Map(_))) => {
                let Some(Value::Map(existing)) = map.get_mut(head) else {
                    return;
                };
                existing.extend(incoming);
            }
            value => {
                map.insert(head.clone(), value);
            }
        }
        return;
    }

    if !matches!(map.get(head), Some(Value::Map(_))) {
        map.insert(head.clone(), Value::Map(Document::new()));
    }
    if let Some(Value::Map(next)) = map.get_mut(head) {
        set_in(next, rest, value);
    }
}
