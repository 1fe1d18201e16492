//! Experiment variant naming
//!
//! Variant names are a pure function of position: the variant at index `i`
//! is always `exp{i}`. External tooling correlates these names with output
//! directories that may already exist from an earlier, partially failed run,
//! so naming never looks at mutation content.

use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use sweep_expdef::MutationSet;

/// Prefix shared by every variant name
pub const VARIANT_PREFIX: &str = "exp";

/// One concrete experiment derived from one sweep point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentVariant {
    /// Stable ordinal name (`exp0`, `exp1`, ...)
    pub name: String,
    /// Mutations realizing this variant
    pub mutations: MutationSet,
}

/// Name of the variant at a zero-based position
#[inline]
#[must_use]
pub fn variant_name(index: usize) -> String {
    format!("{VARIANT_PREFIX}{index}")
}

/// Pair each mutation set with its ordinal name
#[must_use]
pub fn name_variants(mutation_sets: Vec<MutationSet>) -> Vec<ExperimentVariant> {
    mutation_sets
        .into_iter()
        .enumerate()
        .map(|(i, mutations)| ExperimentVariant {
            name: variant_name(i),
            mutations,
        })
        .collect()
}

/// Default number of batch sizes whose name sequences are kept
pub const DEFAULT_NAME_CACHE_CAPACITY: u64 = 64;

/// Assigns ordinal names to variants, caching name sequences by batch size
///
/// Cached entries are never modified after insertion, so one registry can be
/// shared across threads expanding independent criteria.
#[derive(Debug, Clone)]
pub struct ExperimentVariantRegistry {
    names: Cache<usize, Arc<[String]>>,
}

impl Default for ExperimentVariantRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_NAME_CACHE_CAPACITY)
    }
}

impl ExperimentVariantRegistry {
    /// Create registry keeping up to `capacity` name sequences
    #[inline]
    #[must_use]
    pub fn new(capacity: u64) -> Self {
        Self {
            names: Cache::new(capacity),
        }
    }

    /// Names for a batch of `len` variants
    #[must_use]
    pub fn names(&self, len: usize) -> Arc<[String]> {
        self.names.get_with(len, || {
            tracing::debug!(len, "computing variant names");
            (0..len).map(variant_name).collect()
        })
    }

    /// Pair each mutation set with its ordinal name
    #[must_use]
    pub fn name_variants(&self, mutation_sets: Vec<MutationSet>) -> Vec<ExperimentVariant> {
        let names = self.names(mutation_sets.len());
        mutation_sets
            .into_iter()
            .zip(names.iter())
            .map(|(mutations, name)| ExperimentVariant {
                name: name.clone(),
                mutations,
            })
            .collect()
    }

    /// Check if names for a batch size are cached
    #[inline]
    #[must_use]
    pub fn is_cached(&self, len: usize) -> bool {
        self.names.contains_key(&len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweep_expdef::AttrMutation;

    fn sets(n: usize) -> Vec<MutationSet> {
        (0..n)
            .map(|i| MutationSet::new().with(AttrMutation::new("p", "k", i.to_string())))
            .collect()
    }

    #[test]
    fn names_are_ordinal() {
        let variants = name_variants(sets(3));
        let names: Vec<_> = variants.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["exp0", "exp1", "exp2"]);
    }

    #[test]
    fn names_ignore_content() {
        let identical = vec![MutationSet::new(); 2];
        let variants = name_variants(identical);
        assert_eq!(variants[0].name, "exp0");
        assert_eq!(variants[1].name, "exp1");
    }

    #[test]
    fn empty_batch_has_no_names() {
        assert!(name_variants(Vec::new()).is_empty());
    }

    #[test]
    fn registry_matches_free_function() {
        let registry = ExperimentVariantRegistry::default();
        assert_eq!(registry.name_variants(sets(4)), name_variants(sets(4)));
    }

    #[test]
    fn registry_caches_by_len() {
        let registry = ExperimentVariantRegistry::default();
        assert!(!registry.is_cached(5));
        let first = registry.names(5);
        assert!(registry.is_cached(5));
        let second = registry.names(5);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn registry_is_idempotent() {
        let registry = ExperimentVariantRegistry::default();
        let a: Vec<_> = registry.name_variants(sets(3)).into_iter().map(|v| v.name).collect();
        let b: Vec<_> = registry.name_variants(sets(3)).into_iter().map(|v| v.name).collect();
        assert_eq!(a, b);
    }
}
