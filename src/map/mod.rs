//! Generic ordered key-value container.
//!
//! [`OrderedMap`] backs every table in the system (tournaments, players and
//! the per-tournament game lists). Keys are kept sorted by their `Ord`
//! implementation, so traversal is always ascending regardless of the order
//! in which entries were inserted.
//!
//! Storage is a sorted `Vec` grown through `try_reserve`, which makes
//! allocation failure observable: it surfaces as [`MapError::OutOfMemory`]
//! instead of aborting the process.

use std::collections::TryReserveError;
use std::fmt;
use std::slice;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors that can occur during map operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("out of memory while growing the map")]
    OutOfMemory,
}

impl From<TryReserveError> for MapError {
    fn from(_: TryReserveError) -> Self {
        MapError::OutOfMemory
    }
}

/// Ordered map with unique keys and ascending traversal.
#[derive(Clone, PartialEq)]
pub struct OrderedMap<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, key: &K) -> Result<usize, usize> {
        self.entries.binary_search_by(|(k, _)| k.cmp(key))
    }

    /// Make room for at least `additional` more entries.
    ///
    /// Once this succeeds, the next `additional` inserts of new keys cannot
    /// fail.
    pub fn reserve(&mut self, additional: usize) -> Result<(), MapError> {
        self.entries.try_reserve(additional)?;
        Ok(())
    }

    /// Insert a value, overwriting any value already stored under `key`.
    pub fn put(&mut self, key: K, value: V) -> Result<(), MapError> {
        match self.position(&key) {
            Ok(idx) => self.entries[idx].1 = value,
            Err(idx) => {
                self.entries.try_reserve(1)?;
                self.entries.insert(idx, (key, value));
            }
        }
        Ok(())
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.position(key).ok().map(|idx| &self.entries[idx].1)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        match self.position(key) {
            Ok(idx) => Some(&mut self.entries[idx].1),
            Err(_) => None,
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.position(key).is_ok()
    }

    /// Remove the entry stored under `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.position(key).ok()?;
        Some(self.entries.remove(idx).1)
    }
}

impl<K, V> OrderedMap<K, V> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.entries.iter(),
        }
    }

    /// Values in ascending key order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: self.entries.iter(),
        }
    }

    /// `(key, value)` pairs in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Mutable access to every value, in ascending key order.
    ///
    /// Keys stay immutable so the ordering cannot be broken.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.iter_mut().map(|(_, v)| v)
    }
}

impl<K: Clone, V: Clone> OrderedMap<K, V> {
    /// Deep copy that reports allocation failure instead of aborting.
    pub fn try_clone(&self) -> Result<Self, MapError> {
        let mut entries = Vec::new();
        entries.try_reserve_exact(self.entries.len())?;
        entries.extend(self.entries.iter().cloned());
        Ok(Self { entries })
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

/// Iterator over the keys of an [`OrderedMap`].
pub struct Keys<'a, K, V> {
    inner: slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Iterator over the values of an [`OrderedMap`].
pub struct Values<'a, K, V> {
    inner: slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Iterator over the entries of an [`OrderedMap`].
pub struct Iter<'a, K, V> {
    inner: slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Serialized as a plain list of entries so integer keys survive JSON.
impl<K: Serialize, V: Serialize> Serialize for OrderedMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de, K: Ord + Deserialize<'de>, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<K, V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut entries: Vec<(K, V)> = Vec::deserialize(deserializer)?;
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.dedup_by(|later, earlier| later.0 == earlier.0);
        Ok(Self { entries })
    }
}
