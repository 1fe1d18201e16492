//! Sweep Core - batch planning for experiment orchestration
//!
//! Ties the sweep crates together:
//! - Loads and layers configuration (defaults, file, cmdline)
//! - Parses experiment setup values
//! - Expands batch criteria into named experiment variants
//! - Resolves scenarios and renders their generator mutations
//!
//! # Example
//!
//! ```rust
//! use sweep_core::{BatchPlan, SweepConfig};
//!
//! # fn example() -> Result<(), sweep_core::SweepError> {
//! let plan = BatchPlan::from_config(SweepConfig::new().resolved())?;
//!
//! let batch = plan.expand("fuel.0.100.C5")?;
//! assert_eq!(batch.variants[4].name, "exp4");
//!
//! let scenario = plan.scenario("HouseWorld.16x16x1")?;
//! let setup = plan.exp_setup("T1000.N20")?;
//! let trees = sweep_core::render(
//!     &batch,
//!     &[&scenario.mutations, &setup.gen_attr_changelist()],
//!     &Default::default(),
//! )?;
//! assert_eq!(trees.len(), 5);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod exp_setup;
pub mod plan;

pub use config::{ResolvedConfig, SweepConfig};
pub use error::{ConfigError, ExpSetupError, SweepError, SweepResult};
pub use exp_setup::{ExpSetup, ExpSetupOverrides, EXP_SETUP_PATH};
pub use plan::{render, Batch, BatchPlan, ScenarioBuild};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for planning sweeps
    pub use crate::{
        Batch, BatchPlan, ExpSetup, ResolvedConfig, ScenarioBuild, SweepConfig, SweepError,
        SweepResult,
    };
    pub use sweep_criteria::{ExperimentVariant, GraphInfo, RangePolicy};
    pub use sweep_expdef::{AttrMutation, AttrTree, MutationSet};
    pub use sweep_scenario::SuffixPolicy;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
