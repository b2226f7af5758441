//! Insertion-ordered action maps
//!
//! Every mapping the search manipulates (priors, visit counts, children,
//! scores) is keyed by action and must iterate in a stable order so that
//! tie-breaking and noise pairing are reproducible. `ActionMap` is a small
//! association list: lookups are linear, which is fine for the branching
//! factors of board games, and iteration follows insertion order.

use serde::{Deserialize, Serialize};

/// Ordered mapping from keys (usually actions) to values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionMap<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Default for ActionMap<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K, V> ActionMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
        self.entries.iter_mut().map(|(k, v)| (&*k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Entry at position `index` in insertion order.
    pub fn get_index(&self, index: usize) -> Option<(&K, &V)> {
        self.entries.get(index).map(|(k, v)| (k, v))
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<(&K, &mut V)> {
        self.entries.get_mut(index).map(|(k, v)| (&*k, v))
    }

    /// Builds a map with the same keys, in the same order, and transformed values.
    pub fn map_values<W, F>(&self, mut f: F) -> ActionMap<K, W>
    where
        K: Clone,
        F: FnMut(&V) -> W,
    {
        ActionMap {
            entries: self.entries.iter().map(|(k, v)| (k.clone(), f(v))).collect(),
        }
    }
}

impl<K: PartialEq, V> ActionMap<K, V> {
    /// Inserts a value, returning the previous one if the key was present.
    ///
    /// A replaced key keeps its original position.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.index_of(&key) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index_of(key).is_some()
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let index = self.index_of(key)?;
        Some(self.entries.remove(index).1)
    }

    /// True when both maps hold exactly the same key set, in any order.
    pub fn same_keys<W>(&self, other: &ActionMap<K, W>) -> bool {
        self.len() == other.len() && self.keys().all(|k| other.contains_key(k))
    }
}

impl<K: PartialEq, V> FromIterator<(K, V)> for ActionMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<K, V> IntoIterator for ActionMap<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
