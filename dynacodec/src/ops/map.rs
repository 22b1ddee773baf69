//
// Copyright 2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Ordered key/value view of a map node.

/// Ordered key/value pairs read from, or gathered for, a map node.
///
/// Keys are nodes of the same representation as the values. Insertion order is
/// preserved and inserting an existing key replaces its value in place.
///
/// # Examples
///
/// ```rust
/// use dynacodec::ops::MapView;
///
/// let mut map = MapView::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
/// assert_eq!(map.insert("a", 3), Some(1));
/// assert_eq!(map.get(&"a"), Some(&3));
/// assert_eq!(map.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MapView<N> {
    entries: Vec<(N, N)>,
}

impl<N> MapView<N> {
    /// Creates an empty view.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the view has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, (N, N)> {
        self.entries.iter()
    }

    /// Consumes the view, returning its entries in order.
    #[must_use]
    pub fn into_entries(self) -> Vec<(N, N)> {
        self.entries
    }
}

impl<N: PartialEq> MapView<N> {
    /// Builds a view from pairs; later duplicates replace earlier ones.
    #[must_use]
    pub fn from_entries(entries: Vec<(N, N)>) -> Self {
        entries.into_iter().collect()
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &N) -> Option<&N> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &N) -> bool {
        self.get(key).is_some()
    }

    /// Inserts a value, returning the one it replaced.
    pub fn insert(&mut self, key: N, value: N) -> Option<N> {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Removes and returns the value stored under `key`.
    pub fn remove(&mut self, key: &N) -> Option<N> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }
}

impl<N> Default for MapView<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: PartialEq> FromIterator<(N, N)> for MapView<N> {
    fn from_iter<I: IntoIterator<Item = (N, N)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<N> IntoIterator for MapView<N> {
    type Item = (N, N);
    type IntoIter = std::vec::IntoIter<(N, N)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, N> IntoIterator for &'a MapView<N> {
    type Item = &'a (N, N);
    type IntoIter = std::slice::Iter<'a, (N, N)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map = MapView::new();
        map.insert("x", 1);
        map.insert("y", 2);
        map.insert("x", 9);
        assert_eq!(map.into_entries(), vec![("x", 9), ("y", 2)]);
    }

    #[test]
    fn test_from_entries_collapses_duplicates() {
        let map = MapView::from_entries(vec![("k", 1), ("k", 2)]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&"k"), Some(&2));
    }

    #[test]
    fn test_remove() {
        let mut map = MapView::from_entries(vec![("a", 1), ("b", 2)]);
        assert_eq!(map.remove(&"a"), Some(1));
        assert_eq!(map.remove(&"a"), None);
        assert!(!map.contains_key(&"a"));
        assert!(map.contains_key(&"b"));
    }
}
