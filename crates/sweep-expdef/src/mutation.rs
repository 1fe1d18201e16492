//! Attribute mutations against experiment definitions
//!
//! Provides [`AttrMutation`] and [`MutationSet`]: write-only instructions
//! replayed against a document through [`ExpDefConsumer`].

use crate::path::ExpDefPath;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display, Formatter};

/// Instruction to set a named attribute at a document path
///
/// The path is opaque and handed to the consumer unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttrMutation {
    /// Target element within the definition
    pub path: ExpDefPath,
    /// Attribute name
    pub key: String,
    /// Attribute value, already stringified
    pub value: String,
}

impl AttrMutation {
    /// Create new mutation
    #[inline]
    #[must_use]
    pub fn new(
        path: impl Into<ExpDefPath>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    /// Check if this mutation targets the same attribute as another
    #[inline]
    #[must_use]
    pub fn same_target(&self, other: &Self) -> bool {
        self.path == other.path && self.key == other.key
    }
}

impl Display for AttrMutation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/@{}={}", self.path, self.key, self.value)
    }
}

/// Ordered set of mutations realizing one experiment variant
///
/// Order is significant: consumers replay mutations sequentially and a later
/// mutation may rely on an element created by an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MutationSet(Vec<AttrMutation>);

impl MutationSet {
    /// Create empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create empty set with room for `n` mutations
    #[inline]
    #[must_use]
    pub fn with_capacity(n: usize) -> Self {
        Self(Vec::with_capacity(n))
    }

    /// Append a mutation, preserving insertion order
    #[inline]
    pub fn push(&mut self, mutation: AttrMutation) {
        self.0.push(mutation);
    }

    /// Append a mutation, builder style
    #[inline]
    #[must_use]
    pub fn with(mut self, mutation: AttrMutation) -> Self {
        self.0.push(mutation);
        self
    }

    /// Number of mutations
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if set is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in replay order
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, AttrMutation> {
        self.0.iter()
    }

    /// Mutations as a slice
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[AttrMutation] {
        &self.0
    }

    /// Find the last mutation for a `(path, key)` pair
    #[must_use]
    pub fn find(&self, path: &str, key: &str) -> Option<&AttrMutation> {
        self.0
            .iter()
            .rev()
            .find(|m| m.path.as_str() == path && m.key == key)
    }

    /// Replay every mutation, in order, against a consumer
    ///
    /// # Errors
    /// Stops at and returns the first consumer error; mutations before it have
    /// already been applied.
    pub fn apply_to<C: ExpDefConsumer + ?Sized>(&self, consumer: &mut C) -> Result<(), C::Error> {
        for mutation in &self.0 {
            tracing::trace!(%mutation, "applying attribute mutation");
            consumer.apply(&mutation.path, &mutation.key, &mutation.value)?;
        }
        Ok(())
    }
}

impl From<Vec<AttrMutation>> for MutationSet {
    fn from(mutations: Vec<AttrMutation>) -> Self {
        Self(mutations)
    }
}

impl FromIterator<AttrMutation> for MutationSet {
    fn from_iter<I: IntoIterator<Item = AttrMutation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for MutationSet {
    type Item = AttrMutation;
    type IntoIter = std::vec::IntoIter<AttrMutation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MutationSet {
    type Item = &'a AttrMutation;
    type IntoIter = std::slice::Iter<'a, AttrMutation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Extend<AttrMutation> for MutationSet {
    fn extend<I: IntoIterator<Item = AttrMutation>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

/// Consumer of attribute mutations
///
/// Implement this for the document type that templates are rendered into.
/// Consumers receive write-only instructions; nothing here reads document state.
pub trait ExpDefConsumer {
    /// Error raised when a mutation cannot be applied
    type Error: std::error::Error + Send + Sync + 'static;

    /// Set attribute `key` to `value` on the element at `path`
    ///
    /// # Errors
    /// Returns error if the consumer rejects the instruction
    fn apply(&mut self, path: &ExpDefPath, key: &str, value: &str) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        seen: Vec<String>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("rejected {0}")]
    struct Rejected(String);

    impl ExpDefConsumer for Recorder {
        type Error = Rejected;

        fn apply(&mut self, path: &ExpDefPath, key: &str, value: &str) -> Result<(), Rejected> {
            if key == "forbidden" {
                return Err(Rejected(key.to_string()));
            }
            self.seen.push(format!("{path}:{key}={value}"));
            Ok(())
        }
    }

    #[test]
    fn mutation_display() {
        let m = AttrMutation::new("fuel", "level", "3.0");
        assert_eq!(m.to_string(), "fuel/@level=3.0");
    }

    #[test]
    fn mutation_same_target() {
        let a = AttrMutation::new("fuel", "level", "1.0");
        let b = AttrMutation::new("fuel", "level", "2.0");
        let c = AttrMutation::new("fuel", "type", "gasoline");
        assert!(a.same_target(&b));
        assert!(!a.same_target(&c));
    }

    #[test]
    fn set_preserves_order() {
        let set = MutationSet::new()
            .with(AttrMutation::new("fuel", "level", "1.0"))
            .with(AttrMutation::new("fuel", "type", "gasoline"));

        let keys: Vec<_> = set.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, vec!["level", "type"]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn set_find_returns_last_write() {
        let set: MutationSet = vec![
            AttrMutation::new("fuel", "level", "1.0"),
            AttrMutation::new("fuel", "level", "2.0"),
        ]
        .into();
        assert_eq!(set.find("fuel", "level").unwrap().value, "2.0");
        assert!(set.find("fuel", "type").is_none());
    }

    #[test]
    fn apply_replays_in_order() {
        let set: MutationSet = vec![
            AttrMutation::new(".//arena", "size", "10, 10, 2"),
            AttrMutation::new(".//wheel_turning", "max_speed", "3.0"),
        ]
        .into();

        let mut recorder = Recorder::default();
        set.apply_to(&mut recorder).unwrap();
        assert_eq!(
            recorder.seen,
            vec![
                ".//arena:size=10, 10, 2".to_string(),
                ".//wheel_turning:max_speed=3.0".to_string()
            ]
        );
    }

    #[test]
    fn apply_stops_at_first_error() {
        let set: MutationSet = vec![
            AttrMutation::new("a", "ok", "1"),
            AttrMutation::new("a", "forbidden", "2"),
            AttrMutation::new("a", "never", "3"),
        ]
        .into();

        let mut recorder = Recorder::default();
        let result = set.apply_to(&mut recorder);
        assert!(result.is_err());
        assert_eq!(recorder.seen.len(), 1);
    }

    #[test]
    fn set_serializes_as_array() {
        let set = MutationSet::new().with(AttrMutation::new("fuel", "type", "gasoline"));
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"path": "fuel", "key": "type", "value": "gasoline"}])
        );
    }
}
