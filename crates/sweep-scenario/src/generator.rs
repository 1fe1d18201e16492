//! Generator dispatch table
//!
//! Maps generator names (as produced by [`crate::ScenarioRegistry`]) to the
//! handlers that render scenario-level mutations.

use crate::error::{ScenarioError, ScenarioResult};
use crate::registry::Resolution;
use crate::spec::ScenarioSpec;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use sweep_expdef::{AttrMutation, MutationSet};

/// Handler rendering the mutations for one scenario family
pub type GeneratorFn = Arc<dyn Fn(&ScenarioSpec) -> MutationSet + Send + Sync>;

/// Arena element written by the built-in generators
pub const ARENA_PATH: &str = ".//arena";

/// Arena size and center from the scenario dimensions
#[must_use]
pub fn arena_shape(spec: &ScenarioSpec) -> MutationSet {
    let d = spec.dims;
    let half = |v: u32| f64::from(v) / 2.0;
    MutationSet::new()
        .with(AttrMutation::new(
            ARENA_PATH,
            "size",
            format!("{}, {}, {}", d.x, d.y, d.z),
        ))
        .with(AttrMutation::new(
            ARENA_PATH,
            "center",
            format!("{:.1}, {:.1}, {:.1}", half(d.x), half(d.y), half(d.z)),
        ))
}

/// Name → handler table
#[derive(Clone, Default)]
pub struct GeneratorTable {
    handlers: HashMap<String, GeneratorFn>,
}

impl fmt::Debug for GeneratorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.handlers.keys().collect();
        names.sort();
        f.debug_struct("GeneratorTable")
            .field("generators", &names)
            .finish()
    }
}

impl GeneratorTable {
    /// Create empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with a handler for every built-in scenario family
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        for name in [
            "low_block_count_foraging",
            "high_block_count_foraging",
            "houseworld_all_exp",
            "generate_pewpew1",
            "generate_pewpew2",
        ] {
            table.register(name, arena_shape);
        }
        table
    }

    /// Register a handler, replacing any earlier one with the same name
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&ScenarioSpec) -> MutationSet + Send + Sync + 'static,
    {
        self.handlers.insert(name.into(), Arc::new(handler));
    }

    /// Check if a handler is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Number of handlers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if table is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Invoke the handler named by a resolution
    ///
    /// # Errors
    /// Returns [`ScenarioError::UnknownGenerator`] if nothing is registered
    /// under the resolved name.
    pub fn dispatch(&self, resolution: &Resolution) -> ScenarioResult<MutationSet> {
        let handler = self.handlers.get(&resolution.generator).ok_or_else(|| {
            ScenarioError::UnknownGenerator {
                raw: resolution.spec.to_string(),
                name: resolution.generator.clone(),
            }
        })?;
        tracing::debug!(generator = %resolution.generator, "dispatching scenario generator");
        Ok(handler(&resolution.spec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ScenarioRegistry;

    #[test]
    fn defaults_cover_default_registry() {
        let table = GeneratorTable::with_defaults();
        for name in ScenarioRegistry::with_defaults().generator_names() {
            assert!(table.contains(name), "missing generator {name}");
        }
    }

    #[test]
    fn dispatch_renders_arena() {
        let resolution = ScenarioRegistry::with_defaults()
            .resolve("LowBlockCount.10x10x2")
            .unwrap();
        let set = GeneratorTable::with_defaults().dispatch(&resolution).unwrap();

        assert_eq!(set.find(ARENA_PATH, "size").unwrap().value, "10, 10, 2");
        assert_eq!(set.find(ARENA_PATH, "center").unwrap().value, "5.0, 5.0, 1.0");
    }

    #[test]
    fn dispatch_unknown_generator() {
        let resolution = ScenarioRegistry::with_defaults()
            .resolve("HouseWorld.4x4x1")
            .unwrap();
        let err = GeneratorTable::new().dispatch(&resolution).unwrap_err();
        assert!(matches!(err, ScenarioError::UnknownGenerator { name, .. } if name == "houseworld_all_exp"));
    }

    #[test]
    fn custom_handler_replaces_default() {
        let mut table = GeneratorTable::with_defaults();
        table.register("houseworld_all_exp", |spec: &ScenarioSpec| {
            MutationSet::new().with(AttrMutation::new("world", "name", spec.tag.clone()))
        });
        let resolution = ScenarioRegistry::with_defaults()
            .resolve("HouseWorld.4x4x1")
            .unwrap();
        let set = table.dispatch(&resolution).unwrap();
        assert_eq!(set.find("world", "name").unwrap().value, "HouseWorld");
    }
}
