use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Set of descriptive tags (features, themes, designers).
///
/// Stored as the document's array so order and contents round-trip untouched;
/// membership and size follow set semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|existing| existing == tag)
    }

    /// Adds `tag` unless already present. Returns whether it was added.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.contains(&tag) {
            return false;
        }
        self.0.push(tag);
        true
    }

    /// Removes every occurrence of `tag`. Returns whether anything was removed.
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| existing != tag);
        self.0.len() != before
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.0.iter().collect::<HashSet<_>>().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Distinct tags of `self` that `other` lacks, in document order.
    pub fn difference<'a>(&'a self, other: &TagSet) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        self.iter()
            .filter(|tag| !other.contains(tag) && seen.insert(*tag))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}
