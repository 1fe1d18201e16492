//! Sweep Batch Criteria
//!
//! Turns a compact cmdline sweep description into an ordered batch of named
//! experiment variants, each a set of attribute mutations against a template
//! experiment definition.
//!
//! # Pipeline
//!
//! ```text
//! "fuel.1.9.C5" → SweepSpecParser → SweepSpec → expand → [SweepValue]
//!               → MutationSetBuilder → [MutationSet] → name_variants → [ExperimentVariant]
//! ```
//!
//! # Example
//!
//! ```rust
//! use sweep_criteria::{CriteriaCatalog, SweepSpecParser};
//!
//! let catalog = CriteriaCatalog::with_defaults();
//! let criteria = catalog.factory("maxspeed.1.9.C5", &SweepSpecParser::new()).unwrap();
//!
//! assert_eq!(criteria.gen_exp_names(), ["exp0", "exp1", "exp2", "exp3", "exp4"]);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod catalog;
pub mod criteria;
pub mod error;
pub mod expand;
pub mod spec;
pub mod template;
pub mod variant;

// Re-exports for convenience
pub use catalog::{CriteriaCatalog, CriterionDef};
pub use criteria::{BatchCriteria, GraphInfo};
pub use error::{CriteriaError, CriteriaResult};
pub use expand::{expand, SweepValue};
pub use spec::{
    RangePolicy, SweepSpec, SweepSpecParser, MANUAL_SPEC_NAME, MAX_CARDINALITY, SPEC_SECTIONS,
};
pub use template::{build, MutationSetBuilder, MutationTemplate, TemplateEntry};
pub use variant::{
    name_variants, variant_name, ExperimentVariant, ExperimentVariantRegistry, VARIANT_PREFIX,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with batch criteria
    pub use crate::catalog::{CriteriaCatalog, CriterionDef};
    pub use crate::criteria::BatchCriteria;
    pub use crate::error::CriteriaError;
    pub use crate::expand::{expand, SweepValue};
    pub use crate::spec::{RangePolicy, SweepSpec, SweepSpecParser};
    pub use crate::template::{MutationSetBuilder, MutationTemplate};
    pub use crate::variant::{ExperimentVariant, ExperimentVariantRegistry};
    pub use sweep_expdef::{AttrMutation, MutationSet};
}
