//! The flat key/value store behind a [`DashDb`](crate::DashDb).
//!
//! [`FlatMap`] wraps an [`IndexMap`] so entries keep the order in which they
//! were first inserted. The diagnostic dump walks that order; saved text is
//! always sorted by key instead.
//!
//! ## Examples
//!
//! ```rust
//! use dashdb::FlatMap;
//!
//! let mut map = FlatMap::new();
//! map.insert("b".to_string(), "2".to_string());
//! map.insert("a".to_string(), "1".to_string());
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["b", "a"]);
//!
//! let sorted: Vec<_> = map.sorted().map(|(k, _)| k.as_str()).collect();
//! assert_eq!(sorted, vec!["a", "b"]);
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

/// An insertion-ordered map of composite keys to raw values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatMap(IndexMap<String, String>);

impl FlatMap {
    #[must_use]
    pub fn new() -> Self {
        FlatMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        FlatMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// An existing key keeps its position and gets the new value; the old
    /// value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dashdb::FlatMap;
    ///
    /// let mut map = FlatMap::new();
    /// assert!(map.insert("key".to_string(), "1".to_string()).is_none());
    /// assert_eq!(map.insert("key".to_string(), "2".to_string()), Some("1".to_string()));
    /// ```
    pub fn insert(&mut self, key: String, value: String) -> Option<String> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, String> {
        self.0.keys()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, String> {
        self.0.iter()
    }

    /// Returns the key-value pairs sorted byte-wise by key.
    pub fn sorted(&self) -> impl Iterator<Item = (&String, &String)> {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }
}

impl From<HashMap<String, String>> for FlatMap {
    fn from(map: HashMap<String, String>) -> Self {
        FlatMap(map.into_iter().collect())
    }
}

impl From<FlatMap> for HashMap<String, String> {
    fn from(map: FlatMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for FlatMap {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FlatMap {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, String)> for FlatMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        FlatMap(IndexMap::from_iter(iter))
    }
}
