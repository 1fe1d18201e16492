//! Sweep Experiment Definitions
//!
//! Path-addressed attribute mutations against template experiment definitions.
//!
//! # Core Concepts
//!
//! - [`ExpDefPath`]: Opaque address of an element within a definition
//! - [`AttrMutation`]: Set one attribute at one path
//! - [`MutationSet`]: Ordered mutations realizing one experiment variant
//! - [`ExpDefConsumer`]: Document backend that mutations are replayed against
//!
//! # Example
//!
//! ```rust
//! use sweep_expdef::{AttrMutation, AttrTree, MutationSet};
//!
//! let set = MutationSet::new()
//!     .with(AttrMutation::new("fuel", "level", "3.0"))
//!     .with(AttrMutation::new("fuel", "type", "gasoline"));
//!
//! let mut tree = AttrTree::new();
//! set.apply_to(&mut tree).unwrap();
//! assert_eq!(tree.get("fuel", "level"), Some("3.0"));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod mutation;
mod path;
mod tree;

// Re-exports
pub use mutation::{AttrMutation, ExpDefConsumer, MutationSet};
pub use path::ExpDefPath;
pub use tree::{ApplyError, AttrTree, Attributes};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn replay_into_tree_matches_last_writes() {
        let sets = vec![
            MutationSet::new().with(AttrMutation::new(".//wheel_turning", "max_speed", "1.0")),
            MutationSet::new().with(AttrMutation::new(".//wheel_turning", "max_speed", "3.0")),
        ];

        let mut tree = AttrTree::new();
        for set in &sets {
            set.apply_to(&mut tree).unwrap();
        }
        assert_eq!(tree.get(".//wheel_turning", "max_speed"), Some("3.0"));
    }

    proptest! {
        #[test]
        fn prop_paths_are_never_rewritten(raw in ".*") {
            let path = ExpDefPath::new(raw.clone());
            prop_assert_eq!(path.as_str(), raw.as_str());
            let mutation = AttrMutation::new(path, "k", "v");
            prop_assert_eq!(mutation.path.into_inner(), raw);
        }
    }
}
