//! Server-side field filters.
//!
//! The backend accepts a `filter` query parameter describing which response
//! fields to keep: a JSON document mirroring the response shape with `true`
//! at every position to retain. Filters keep payloads small enough for the
//! constrained devices this client was written for.

use crate::resource::fields;
use serde_json::{Map, Value};

/// Builder for the filter document sent with read requests.
///
/// Paths are dot-separated. Overlapping paths merge: a `true` leaf keeps the
/// whole subtree and absorbs any narrower path at the same position.
#[derive(Debug, Clone, Default)]
pub struct FieldFilter {
    root: Map<String, Value>,
}

impl FieldFilter {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self { root: Map::new() }
    }

    /// Keep the field at `path` in the response.
    pub fn keep(&mut self, path: &str) -> &mut Self {
        set_path(&mut self.root, path);
        self
    }

    /// Keep `sub_path` on every element of the list at `list_path`.
    ///
    /// The backend applies an array filter's first element to all members of
    /// the corresponding response array.
    pub fn keep_each(&mut self, list_path: &str, sub_path: &str) -> &mut Self {
        if let Some(element) = list_element(&mut self.root, list_path) {
            set_path(element, sub_path);
        }
        self
    }

    /// Render the filter for an entity response, `{"data": {...}}`.
    pub fn for_entity(&self) -> Value {
        let mut envelope = Map::new();
        envelope.insert(fields::DATA.to_string(), Value::Object(self.root.clone()));
        Value::Object(envelope)
    }

    /// Render the filter for a collection response, `{"data": [{...}]}`.
    pub fn for_collection(&self) -> Value {
        let mut envelope = Map::new();
        envelope.insert(
            fields::DATA.to_string(),
            Value::Array(vec![Value::Object(self.root.clone())]),
        );
        Value::Object(envelope)
    }
}

/// Set a `true` leaf at a dotted path, merging with existing branches.
fn set_path(node: &mut Map<String, Value>, path: &str) {
    match path.split_once('.') {
        None => {
            node.insert(path.to_string(), Value::Bool(true));
        }
        Some((head, rest)) => {
            let child = node
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            match child {
                // The whole subtree is already kept
                Value::Bool(true) => {}
                Value::Object(map) => set_path(map, rest),
                other => {
                    let mut map = Map::new();
                    set_path(&mut map, rest);
                    *other = Value::Object(map);
                }
            }
        }
    }
}

/// Walk to the list at a dotted path and return its first-element object.
fn list_element<'a>(
    node: &'a mut Map<String, Value>,
    list_path: &str,
) -> Option<&'a mut Map<String, Value>> {
    match list_path.split_once('.') {
        None => {
            let slot = node
                .entry(list_path.to_string())
                .or_insert_with(|| Value::Array(vec![Value::Object(Map::new())]));
            match slot {
                Value::Bool(true) => None,
                Value::Array(items) => {
                    if items.is_empty() {
                        items.push(Value::Object(Map::new()));
                    }
                    match &mut items[0] {
                        Value::Object(map) => Some(map),
                        _ => None,
                    }
                }
                _ => None,
            }
        }
        Some((head, rest)) => {
            let child = node
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            match child {
                Value::Object(map) => list_element(map, rest),
                _ => None,
            }
        }
    }
}
