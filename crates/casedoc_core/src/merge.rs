//! Recursive document merge.

use casedoc_codec::{Document, Value};

/// Merges `overlay` into `base`, returning a new document.
///
/// For every key present in either document: an overlay value wins,
/// except that two mappings at the same key are merged recursively. A
/// key the overlay omits keeps the base value unchanged. Lists are never
/// merged element-wise; an overlay list replaces a base list wholesale.
/// A null overlay value is a real overwrite, not an omission.
///
/// Result key order is base order first, then overlay-only keys in
/// overlay order.
#[must_use]
pub fn deep_merge(base: &Document, overlay: &Document) -> Document {
    let mut result = Document::new();

    for (key, base_value) in base.iter() {
        let merged = match overlay.get(key) {
            Some(overlay_value) => merge_value(base_value, overlay_value),
            None => base_value.clone(),
        };
        result.insert(key.to_string(), merged);
    }

    for (key, overlay_value) in overlay.iter() {
        if !base.contains_key(key) {
            result.insert(key.to_string(), overlay_value.clone());
        }
    }

    result
}

fn merge_value(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Map(base_map), Value::Map(overlay_map)) => {
            Value::Map(deep_merge(base_map, overlay_map))
        }
        (_, overlay_value) => overlay_value.clone(),
    }
}
