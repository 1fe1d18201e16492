//! In-memory attribute tree
//!
//! A minimal [`ExpDefConsumer`] that records attributes per path. Used to
//! preview what a batch of mutation sets does to a template before handing the
//! same instructions to a real document backend.

use crate::mutation::ExpDefConsumer;
use crate::path::ExpDefPath;
use indexmap::IndexMap;
use serde::Serialize;

/// Attributes of one element, in first-write order
pub type Attributes = IndexMap<String, String>;

/// Flat path → attributes map
///
/// In permissive mode, unknown paths are created on first write. In strict
/// mode only paths declared up front may be written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttrTree {
    #[serde(flatten)]
    elements: IndexMap<ExpDefPath, Attributes>,
    #[serde(skip)]
    strict: bool,
}

impl AttrTree {
    /// Create permissive empty tree
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict tree that only accepts writes to `paths`
    #[must_use]
    pub fn strict<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ExpDefPath>,
    {
        Self {
            elements: paths
                .into_iter()
                .map(|p| (p.into(), Attributes::new()))
                .collect(),
            strict: true,
        }
    }

    /// Read an attribute value
    #[must_use]
    pub fn get(&self, path: &str, key: &str) -> Option<&str> {
        self.elements
            .get(&ExpDefPath::new(path))
            .and_then(|attrs| attrs.get(key))
            .map(String::as_str)
    }

    /// All attributes at a path
    #[must_use]
    pub fn attributes(&self, path: &str) -> Option<&Attributes> {
        self.elements.get(&ExpDefPath::new(path))
    }

    /// Check if a path exists
    #[inline]
    #[must_use]
    pub fn contains_path(&self, path: &str) -> bool {
        self.elements.contains_key(&ExpDefPath::new(path))
    }

    /// Number of elements
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if tree has no elements
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate elements in creation order
    pub fn iter(&self) -> impl Iterator<Item = (&ExpDefPath, &Attributes)> {
        self.elements.iter()
    }
}

impl ExpDefConsumer for AttrTree {
    type Error = ApplyError;

    fn apply(&mut self, path: &ExpDefPath, key: &str, value: &str) -> Result<(), ApplyError> {
        if self.strict && !self.elements.contains_key(path) {
            return Err(ApplyError::UnknownPath(path.clone()));
        }
        self.elements
            .entry(path.clone())
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Errors raised by [`AttrTree`]
#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    /// Strict tree has no element at path
    #[error("no element at path '{0}'")]
    UnknownPath(ExpDefPath),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::{AttrMutation, MutationSet};

    #[test]
    fn permissive_tree_creates_paths() {
        let mut tree = AttrTree::new();
        let set = MutationSet::new()
            .with(AttrMutation::new("fuel", "level", "1.0"))
            .with(AttrMutation::new("fuel", "type", "gasoline"));
        set.apply_to(&mut tree).unwrap();

        assert_eq!(tree.get("fuel", "level"), Some("1.0"));
        assert_eq!(tree.get("fuel", "type"), Some("gasoline"));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn later_write_wins() {
        let mut tree = AttrTree::new();
        let set = MutationSet::new()
            .with(AttrMutation::new("fuel", "level", "1.0"))
            .with(AttrMutation::new("fuel", "level", "9.0"));
        set.apply_to(&mut tree).unwrap();
        assert_eq!(tree.get("fuel", "level"), Some("9.0"));
    }

    #[test]
    fn strict_tree_rejects_unknown_path() {
        let mut tree = AttrTree::strict([".//wheel_turning"]);
        let ok = AttrMutation::new(".//wheel_turning", "max_speed", "1.0");
        let bad = AttrMutation::new(".//arena", "size", "1, 1, 1");

        let set = MutationSet::new().with(ok).with(bad);
        let result = set.apply_to(&mut tree);

        assert!(matches!(result, Err(ApplyError::UnknownPath(p)) if p.as_str() == ".//arena"));
        assert_eq!(tree.get(".//wheel_turning", "max_speed"), Some("1.0"));
        assert!(!tree.contains_path(".//arena"));
    }

    #[test]
    fn attributes_keep_first_write_order() {
        let mut tree = AttrTree::new();
        let set = MutationSet::new()
            .with(AttrMutation::new("$.exp_setup", "length", "300"))
            .with(AttrMutation::new("$.exp_setup", "n_datapoints", "50"))
            .with(AttrMutation::new("$.exp_setup", "length", "600"));
        set.apply_to(&mut tree).unwrap();

        let keys: Vec<_> = tree
            .attributes("$.exp_setup")
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["length", "n_datapoints"]);
    }

    #[test]
    fn serializes_as_path_map() {
        let mut tree = AttrTree::strict(["fuel"]);
        MutationSet::new()
            .with(AttrMutation::new("fuel", "level", "2.5"))
            .apply_to(&mut tree)
            .unwrap();

        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json, serde_json::json!({ "fuel": { "level": "2.5" } }));
    }
}
