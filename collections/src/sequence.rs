//! Sequence - a contiguous growable container.
//!
//! The backing store starts small and doubles whenever it runs out of room,
//! so appends stay amortized constant time. Length and capacity are both
//! observable; `capacity >= len` holds at all times.

use std::ops::{Index, IndexMut};

/// Initial capacity of a sequence created with [`Sequence::new`].
pub const DEFAULT_CAPACITY: usize = 4;

/// An ordered, index-addressable container.
///
/// Indexing past the end is a contract violation and panics. Cloning
/// produces an independent deep copy of the backing store.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence<T> {
    items: Vec<T>,
}

impl<T> Sequence<T> {
    /// Create an empty sequence with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty sequence with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Append an item, doubling the backing store when full.
    pub fn push(&mut self, item: T) {
        if self.items.len() == self.items.capacity() {
            self.items.reserve_exact(self.items.capacity().max(1));
        }
        self.items.push(item);
    }

    /// Get the item at `index`. Panics if `index >= len`.
    pub fn get(&self, index: usize) -> &T {
        &self.items[index]
    }

    /// Remove and return the item at `index`, shifting later items down.
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        self.items.remove(index)
    }

    /// Number of items stored.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the sequence holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current capacity of the backing store.
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Remove all items, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterate over the items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: PartialEq> Sequence<T> {
    /// Check if the sequence contains an item equal to `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.items.contains(value)
    }

    /// Remove the first item equal to `value`.
    ///
    /// Returns `true` if an item was removed. When no item matches, the
    /// sequence is left untouched and `false` is returned.
    pub fn remove_item(&mut self, value: &T) -> bool {
        match self.items.iter().position(|item| item == value) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for Sequence<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for Sequence<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut sequence = Sequence::new();
        for item in iter {
            sequence.push(item);
        }
        sequence
    }
}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
