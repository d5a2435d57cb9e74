//! Document serialization driven by the value-kind capability.
//!
//! A document is a JSON object built from an [`AssociativeStore`] for the
//! wire. Values classify themselves through [`DocumentValue::kind`], resolved
//! once per type, and serialization picks its strategy from that kind without
//! inspecting individual values. One level of nesting is supported: a
//! sequence of scalars becomes a list node, a store of scalars becomes an
//! object node. Anything deeper is replaced by [`UNSUPPORTED_MARKER`] and
//! reported through `tracing` - serialization itself never fails.

use crate::{AssociativeStore, Sequence};
use serde_json::{Map, Value};
use std::fmt::Display;

/// Marker written in place of values nested too deeply to serialize.
pub const UNSUPPORTED_MARKER: &str = "unsupported";

/// Structural category of a document value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Plain leaf value: string, number or boolean.
    Scalar,
    /// Ordered list of values.
    Sequence,
    /// Keyed collection of values.
    Store,
}

/// A value that can appear in a serialized document.
///
/// New leaf types join the system by implementing this trait; the containers
/// never need to change.
pub trait DocumentValue {
    /// Structural category of this type.
    fn kind() -> ValueKind
    where
        Self: Sized;

    /// Convert this value into a JSON node.
    fn to_node(&self) -> Value;
}

macro_rules! scalar_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl DocumentValue for $ty {
                fn kind() -> ValueKind {
                    ValueKind::Scalar
                }

                fn to_node(&self) -> Value {
                    Value::from(self.clone())
                }
            }
        )*
    };
}

scalar_value!(String, bool, i32, i64, u32, u64, f64);

impl DocumentValue for &'_ str {
    fn kind() -> ValueKind {
        ValueKind::Scalar
    }

    fn to_node(&self) -> Value {
        Value::from(*self)
    }
}

impl<T: DocumentValue> DocumentValue for Sequence<T> {
    fn kind() -> ValueKind {
        ValueKind::Sequence
    }

    /// A list node when the elements are scalars; the whole list collapses
    /// to the marker otherwise.
    fn to_node(&self) -> Value {
        if T::kind() != ValueKind::Scalar {
            tracing::warn!(
                "sequence of {:?} values is not serializable, writing '{}'",
                T::kind(),
                UNSUPPORTED_MARKER
            );
            return Value::String(UNSUPPORTED_MARKER.to_string());
        }
        Value::Array(self.iter().map(DocumentValue::to_node).collect())
    }
}

impl<K: Display, V: DocumentValue> DocumentValue for AssociativeStore<K, V> {
    fn kind() -> ValueKind {
        ValueKind::Store
    }

    /// An object node; value positions hold the marker when the values are
    /// not scalars. Duplicate keys keep the first entry, matching lookup.
    fn to_node(&self) -> Value {
        let nested = V::kind() != ValueKind::Scalar;
        if nested {
            tracing::warn!(
                "store of {:?} values is not serializable, writing '{}' markers",
                V::kind(),
                UNSUPPORTED_MARKER
            );
        }

        let mut object = Map::new();
        for (key, value) in self.iter() {
            let name = key.to_string();
            if object.contains_key(&name) {
                continue;
            }
            let node = if nested {
                Value::String(UNSUPPORTED_MARKER.to_string())
            } else {
                value.to_node()
            };
            object.insert(name, node);
        }
        Value::Object(object)
    }
}

impl<K: Display, V: DocumentValue> AssociativeStore<K, V> {
    /// Serialize this store into a JSON document.
    ///
    /// Keys keep insertion order; duplicate keys keep the first entry. Each
    /// value becomes the node its kind dictates: scalars become leaves,
    /// sequences of scalars become lists, stores of scalars become nested
    /// objects. Deeper nesting turns into [`UNSUPPORTED_MARKER`].
    pub fn to_document(&self) -> Map<String, Value> {
        let mut document = Map::new();
        for (key, value) in self.iter() {
            let name = key.to_string();
            if document.contains_key(&name) {
                continue;
            }
            document.insert(name, value.to_node());
        }
        document
    }
}
