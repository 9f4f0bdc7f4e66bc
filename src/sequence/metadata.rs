//! Immutable metadata attached to sequence nodes.
//!
//! [`Metadata`] is a small persistent map from string keys to string values.
//! Updates return a new map and leave the original untouched; clones share
//! the underlying storage until one of them is updated.
//!
//! # Examples
//!
//! ```rust
//! use lazy_iterate::sequence::Metadata;
//!
//! let metadata = Metadata::new().insert("source", "counter");
//! let updated = metadata.insert("owner", "scheduler");
//!
//! assert_eq!(metadata.len(), 1);     // Original unchanged
//! assert_eq!(updated.len(), 2);      // New version
//! assert_eq!(updated.get("source"), Some("counter"));
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::sync::Arc;

/// A persistent key-value map carried by an [`Iterate`](super::Iterate) node.
///
/// Metadata never influences the generated values; it only travels with the
/// node it was attached to.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Metadata {
    entries: Arc<BTreeMap<String, String>>,
}

impl Metadata {
    /// Creates an empty metadata map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_iterate::sequence::Metadata;
    ///
    /// let metadata = Metadata::new();
    /// assert!(metadata.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new map with `key` bound to `value`.
    ///
    /// An existing binding for `key` is replaced in the returned map only.
    #[must_use]
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = Arc::clone(&self.entries);
        Arc::make_mut(&mut entries).insert(key.into(), value.into());
        Self { entries }
    }

    /// Returns a new map without `key`.
    ///
    /// When `key` is absent the returned map shares storage with `self`.
    #[must_use]
    pub fn remove(&self, key: &str) -> Self {
        if !self.entries.contains_key(key) {
            return self.clone();
        }
        let mut entries = Arc::clone(&self.entries);
        Arc::make_mut(&mut entries).remove(key);
        Self { entries }
    }

    /// Returns the value bound to `key`, if any.
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns `true` if `key` is bound.
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of bindings.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no bindings.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the bindings in key order.
    pub fn iter(&self) -> MetadataIterator<'_> {
        MetadataIterator {
            inner: self.entries.iter(),
        }
    }
}

/// Iterator over the bindings of a [`Metadata`] map, in key order.
pub struct MetadataIterator<'a> {
    inner: btree_map::Iter<'a, String, String>,
}

impl<'a> Iterator for MetadataIterator<'a> {
    type Item = (&'a str, &'a str);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for MetadataIterator<'_> {}

impl<'a> IntoIterator for &'a Metadata {
    type Item = (&'a str, &'a str);
    type IntoIter = MetadataIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            entries: Arc::new(entries),
        }
    }
}

impl fmt::Debug for Metadata {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Metadata {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Metadata {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = <BTreeMap<String, String> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Self {
            entries: Arc::new(entries),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_insert_leaves_original_untouched() {
        let original = Metadata::new().insert("a", "1");
        let updated = original.insert("a", "2");

        assert_eq!(original.get("a"), Some("1"));
        assert_eq!(updated.get("a"), Some("2"));
    }

    #[rstest]
    fn test_clone_shares_storage() {
        let metadata = Metadata::new().insert("a", "1");
        let cloned = metadata.clone();
        assert!(Arc::ptr_eq(&metadata.entries, &cloned.entries));
    }

    #[rstest]
    fn test_remove_absent_key_shares_storage() {
        let metadata = Metadata::new().insert("a", "1");
        let removed = metadata.remove("missing");
        assert!(Arc::ptr_eq(&metadata.entries, &removed.entries));
    }

    #[rstest]
    fn test_remove_present_key() {
        let metadata = Metadata::new().insert("a", "1").insert("b", "2");
        let removed = metadata.remove("a");

        assert!(metadata.contains_key("a"));
        assert!(!removed.contains_key("a"));
        assert_eq!(removed.len(), 1);
    }

    #[rstest]
    fn test_iter_is_key_ordered() {
        let metadata: Metadata = [("b", "2"), ("a", "1"), ("c", "3")].into_iter().collect();
        let keys: Vec<&str> = metadata.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[rstest]
    fn test_debug_format() {
        let metadata = Metadata::new().insert("a", "1");
        assert_eq!(format!("{metadata:?}"), r#"{"a": "1"}"#);
    }
}
