//! Feature name registry: feature index to human-readable name.

use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::debug;

/// The graph-wide feature name dictionary.
///
/// Maps a feature's position in a feature vector to a readable description.
/// Entries are only ever added: once an index has a name, later
/// dictionaries cannot change it.
#[derive(Debug, Default, Clone, Serialize)]
pub struct FeatureNameRegistry {
    names: BTreeMap<usize, String>,
}

impl FeatureNameRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Names feature `index` unless it already has a name.
    ///
    /// Returns `true` if the entry was added.
    pub fn insert(&mut self, index: usize, name: impl Into<String>) -> bool {
        let name = name.into();
        match self.names.get(&index) {
            Some(existing) => {
                if *existing != name {
                    debug!(
                        "Feature {} already named {:?}, ignoring {:?}",
                        index, existing, name
                    );
                }
                false
            }
            None => {
                self.names.insert(index, name);
                true
            }
        }
    }

    /// Adds every entry, keeping existing names. Returns how many were added.
    pub fn extend<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = (usize, String)>,
    {
        let mut added = 0;
        for (index, name) in entries {
            if self.insert(index, name) {
                added += 1;
            }
        }
        added
    }

    /// The description of feature `index`, if known.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(&index).map(String::as_str)
    }

    /// The key feature `index` is stored under: its description, or
    /// `feature_<index>` when the registry has no entry.
    pub fn resolve(&self, index: usize) -> Cow<'_, str> {
        match self.get(index) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(fallback_name(index)),
        }
    }

    /// Iterates entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names.iter().map(|(i, n)| (*i, n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Positional name used for features without a dictionary entry.
pub fn fallback_name(index: usize) -> String {
    format!("feature_{}", index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_resolve() {
        let mut registry = FeatureNameRegistry::new();
        assert!(registry.insert(0, "gender;anonymized feature 77"));

        assert_eq!(registry.resolve(0), "gender;anonymized feature 77");
        assert_eq!(registry.resolve(4), "feature_4");
        assert_eq!(registry.get(4), None);
    }

    #[test]
    fn test_entries_are_never_overwritten() {
        let mut registry = FeatureNameRegistry::new();
        registry.insert(1, "first");

        assert!(!registry.insert(1, "second"));
        let added = registry.extend(vec![(1, "third".to_string()), (2, "other".to_string())]);

        assert_eq!(added, 1);
        assert_eq!(registry.get(1), Some("first"));
        assert_eq!(registry.len(), 2);
    }
}
