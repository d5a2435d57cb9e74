//! AssociativeStore - an insertion-ordered keyed container.
//!
//! Entries live in a plain vector and keep the order they were appended in.
//! Keys are not deduplicated: [`AssociativeStore::append`] always adds a new
//! entry, while [`AssociativeStore::upsert`] replaces the first match.
//! Lookups always act on the first entry with a matching key.

use std::borrow::Borrow;

/// An ordered collection of key-value entries with first-match lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociativeStore<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> AssociativeStore<K, V> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of entries, counting duplicated keys separately.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Add an entry at the end, even if the key already exists.
    pub fn append(&mut self, key: K, value: V) {
        self.entries.push((key, value));
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Iterate over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }
}

impl<K: PartialEq, V> AssociativeStore<K, V> {
    /// Index of the first entry matching `key`.
    fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.entries
            .iter()
            .position(|(existing, _)| existing.borrow() == key)
    }

    /// Get the value of the first entry matching `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.position(key).map(|index| &self.entries[index].1)
    }

    /// Get a mutable value for the first entry matching `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.position(key)
            .map(move |index| &mut self.entries[index].1)
    }

    /// Get the value for `key`, or `fallback` when no entry matches.
    pub fn get_or<'a, Q>(&'a self, key: &Q, fallback: &'a V) -> &'a V
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.get(key).unwrap_or(fallback)
    }

    /// Check if any entry matches `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.position(key).is_some()
    }

    /// Replace the value of the first entry matching `key`, returning the
    /// old value, or insert a new entry when no key matches.
    pub fn upsert(&mut self, key: K, value: V) -> Option<V> {
        match self.position(&key) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Remove and return the value of the first entry matching `key`.
    ///
    /// Later entries with the same key stay in place.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.position(key)
            .map(|index| self.entries.remove(index).1)
    }
}

impl<K, V: PartialEq> AssociativeStore<K, V> {
    /// Check if any entry holds a value equal to `value`.
    pub fn contains_value(&self, value: &V) -> bool {
        self.entries.iter().any(|(_, existing)| existing == value)
    }
}

impl<K, V> Default for AssociativeStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for AssociativeStore<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<K, V> IntoIterator for AssociativeStore<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
