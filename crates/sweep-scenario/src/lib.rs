//! Sweep Scenarios
//!
//! Validates cmdline scenario strings (`<Tag>.<X>x<Y>x<Z>[+<suffix>]`)
//! against an ordered set of naming patterns and resolves them to the
//! generator responsible for that scenario family.
//!
//! # Example
//!
//! ```rust
//! use sweep_scenario::{GeneratorTable, ScenarioRegistry};
//!
//! let registry = ScenarioRegistry::with_defaults();
//! let resolution = registry.resolve("LowBlockCount.10x10x2").unwrap();
//! assert_eq!(resolution.generator, "low_block_count_foraging");
//!
//! let arena = GeneratorTable::with_defaults().dispatch(&resolution).unwrap();
//! assert_eq!(arena.len(), 2);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod generator;
pub mod registry;
pub mod spec;

pub use error::{ScenarioError, ScenarioResult};
pub use generator::{arena_shape, GeneratorFn, GeneratorTable, ARENA_PATH};
pub use registry::{resolve, Resolution, ScenarioPattern, ScenarioPatternDef, ScenarioRegistry};
pub use spec::{split_suffix, Dimensions, ScenarioSpec, SuffixPolicy};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
