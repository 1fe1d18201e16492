//! Batch planning
//!
//! [`BatchPlan`] owns every registry a sweep needs and turns cmdline
//! arguments (criteria, scenario, experiment setup) into named experiment
//! variants and the per-variant attribute trees they produce.

use crate::config::ResolvedConfig;
use crate::error::SweepResult;
use crate::exp_setup::ExpSetup;
use rayon::prelude::*;
use serde::Serialize;
use sweep_criteria::{
    BatchCriteria, CriteriaCatalog, ExperimentVariant, ExperimentVariantRegistry, GraphInfo,
    SweepSpecParser,
};
use sweep_expdef::{AttrTree, MutationSet};
use sweep_scenario::{GeneratorTable, Resolution, ScenarioRegistry};

/// One expanded batch criterion
#[derive(Debug, Clone, Serialize)]
pub struct Batch {
    /// Cmdline argument the batch was built from
    pub criterion: String,
    /// Named variants, in sweep order
    pub variants: Vec<ExperimentVariant>,
    /// Axis information for plotting
    pub graph: GraphInfo,
}

impl Batch {
    /// Number of variants
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Check if batch has no variants
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

/// A resolved scenario and the mutations its generator rendered
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioBuild {
    #[serde(flatten)]
    pub resolution: Resolution,
    pub mutations: MutationSet,
}

/// Sweep planner
#[derive(Debug)]
pub struct BatchPlan {
    parser: SweepSpecParser,
    catalog: CriteriaCatalog,
    scenarios: ScenarioRegistry,
    generators: GeneratorTable,
    names: ExperimentVariantRegistry,
    exp_setup: ExpSetup,
}

impl Default for BatchPlan {
    fn default() -> Self {
        Self {
            parser: SweepSpecParser::default(),
            catalog: CriteriaCatalog::with_defaults(),
            scenarios: ScenarioRegistry::with_defaults(),
            generators: GeneratorTable::with_defaults(),
            names: ExperimentVariantRegistry::default(),
            exp_setup: ExpSetup::default(),
        }
    }
}

impl BatchPlan {
    /// Plan with built-in criteria, scenarios and generators
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from resolved configuration
    ///
    /// # Errors
    /// Returns [`crate::SweepError::Scenario`] if a configured scenario
    /// pattern is not a valid regex.
    pub fn from_config(config: ResolvedConfig) -> SweepResult<Self> {
        let mut catalog = CriteriaCatalog::with_defaults();
        for def in config.criteria {
            catalog.register(def);
        }

        let mut scenarios =
            ScenarioRegistry::with_defaults().with_suffix_policy(config.suffix_policy);
        for def in &config.scenarios {
            scenarios.register_def(def)?;
        }

        tracing::debug!(
            criteria = catalog.len(),
            scenarios = scenarios.len(),
            range_policy = ?config.range_policy,
            "built batch plan"
        );

        Ok(Self {
            parser: SweepSpecParser::new().with_range_policy(config.range_policy),
            catalog,
            scenarios,
            generators: GeneratorTable::with_defaults(),
            names: ExperimentVariantRegistry::new(config.name_cache_capacity),
            exp_setup: config.exp_setup,
        })
    }

    /// Criteria catalog
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &CriteriaCatalog {
        &self.catalog
    }

    /// Scenario registry
    #[inline]
    #[must_use]
    pub fn scenarios(&self) -> &ScenarioRegistry {
        &self.scenarios
    }

    /// Mutable generator table, for registering custom scenario families
    #[inline]
    pub fn generators_mut(&mut self) -> &mut GeneratorTable {
        &mut self.generators
    }

    /// Default experiment setup
    #[inline]
    #[must_use]
    pub fn default_exp_setup(&self) -> ExpSetup {
        self.exp_setup
    }

    /// Build the criteria object for a cmdline argument
    ///
    /// # Errors
    /// Returns [`crate::SweepError::Criteria`] for an unknown criterion or a
    /// malformed sweep spec.
    pub fn criteria(&self, cli_arg: &str) -> SweepResult<BatchCriteria> {
        Ok(self.catalog.factory(cli_arg, &self.parser)?)
    }

    /// Expand one criterion into named variants
    ///
    /// # Errors
    /// See [`BatchPlan::criteria`].
    pub fn expand(&self, cli_arg: &str) -> SweepResult<Batch> {
        let criteria = self.criteria(cli_arg)?;
        let variants = self
            .names
            .name_variants(criteria.gen_attr_changelist().to_vec());

        tracing::info!(
            criterion = cli_arg,
            variants = variants.len(),
            "expanded batch criterion"
        );

        Ok(Batch {
            criterion: cli_arg.to_string(),
            graph: criteria.graph_info(),
            variants,
        })
    }

    /// Expand independent criteria in parallel
    ///
    /// Results keep the order of `cli_args`; one failure does not affect
    /// the others.
    #[must_use]
    pub fn expand_all<S>(&self, cli_args: &[S]) -> Vec<SweepResult<Batch>>
    where
        S: AsRef<str> + Sync,
    {
        cli_args
            .par_iter()
            .map(|arg| self.expand(arg.as_ref()))
            .collect()
    }

    /// Resolve a scenario name and render its generator mutations
    ///
    /// # Errors
    /// Returns [`crate::SweepError::Scenario`] if the name does not resolve
    /// or no generator is registered for it.
    pub fn scenario(&self, raw: &str) -> SweepResult<ScenarioBuild> {
        let resolution = self.scenarios.resolve(raw)?;
        let mutations = self.generators.dispatch(&resolution)?;
        Ok(ScenarioBuild {
            resolution,
            mutations,
        })
    }

    /// Parse an experiment setup, filling omitted sections from configuration
    ///
    /// # Errors
    /// Returns [`crate::SweepError::ExpSetup`] if the value is malformed.
    pub fn exp_setup(&self, raw: &str) -> SweepResult<ExpSetup> {
        Ok(ExpSetup::parse_with_defaults(raw, self.exp_setup)?)
    }
}

/// Apply shared mutations, then each variant's own, to copies of `base`
///
/// Variant changes win over shared scenario or setup changes on the same
/// attribute.
///
/// # Errors
/// Returns [`crate::SweepError::Apply`] if `base` is strict and a
/// mutation targets an unknown element.
pub fn render(
    batch: &Batch,
    shared: &[&MutationSet],
    base: &AttrTree,
) -> SweepResult<Vec<(String, AttrTree)>> {
    let mut common = base.clone();
    for set in shared {
        set.apply_to(&mut common)?;
    }

    batch
        .variants
        .iter()
        .map(|variant| -> SweepResult<(String, AttrTree)> {
            let mut tree = common.clone();
            variant.mutations.apply_to(&mut tree)?;
            Ok((variant.name.clone(), tree))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SweepConfig;
    use crate::error::SweepError;
    use sweep_criteria::{CriteriaError, RangePolicy};

    #[test]
    fn expand_maxspeed() {
        let batch = BatchPlan::new().expand("maxspeed.1.10.C3").unwrap();
        assert_eq!(batch.len(), 3);
        let names: Vec<_> = batch.variants.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["exp0", "exp1", "exp2"]);
        assert_eq!(batch.graph.xticklabels, ["1.0", "5.5", "10.0"]);
    }

    #[test]
    fn inverted_range_follows_config() {
        let strict = BatchPlan::new();
        assert!(matches!(
            strict.expand("maxspeed.10.1.C2"),
            Err(SweepError::Criteria(CriteriaError::InvertedRange { .. }))
        ));

        let cfg = SweepConfig::new()
            .with_range_policy(RangePolicy::AllowDescending)
            .resolved();
        let lenient = BatchPlan::from_config(cfg).unwrap();
        assert_eq!(
            lenient.expand("maxspeed.10.1.C2").unwrap().graph.xticklabels,
            ["10.0", "1.0"]
        );
    }

    #[test]
    fn expand_all_keeps_order_and_isolates_failures() {
        let results =
            BatchPlan::new().expand_all(&["fuel.0.4.C5", "bogus.1.2.C2", "maxspeed.1.2.C2"]);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().len(), 5);
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().criterion, "maxspeed.1.2.C2");
    }

    #[test]
    fn scenario_build() {
        let build = BatchPlan::new().scenario("HighBlockCount.8x4x2").unwrap();
        assert_eq!(build.resolution.generator, "high_block_count_foraging");
        assert_eq!(build.mutations.len(), 2);
    }

    #[test]
    fn render_variant_wins_over_shared() {
        let plan = BatchPlan::new();
        let batch = plan.expand("maxspeed.1.3.C3").unwrap();
        let shared = MutationSet::new().with(sweep_expdef::AttrMutation::new(
            ".//wheel_turning",
            "max_speed",
            "99",
        ));

        let trees = render(&batch, &[&shared], &AttrTree::new()).unwrap();
        assert_eq!(trees.len(), 3);
        assert_eq!(trees[1].0, "exp1");
        assert_eq!(trees[1].1.get(".//wheel_turning", "max_speed"), Some("2.0"));
    }
}
