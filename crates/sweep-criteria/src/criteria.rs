//! Univariate batch criteria
//!
//! A [`BatchCriteria`] is plain data produced by a factory from a cmdline
//! value: the parsed spec, its expanded values, and the template that turns
//! each value into a mutation set. Nothing about its behavior depends on which
//! criterion it came from.

use crate::error::CriteriaResult;
use crate::expand::{expand, SweepValue};
use crate::spec::{SweepSpec, SweepSpecParser};
use crate::template::{MutationSetBuilder, MutationTemplate};
use crate::variant::{name_variants, variant_name, ExperimentVariant};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use sweep_expdef::MutationSet;

/// Axis metadata for plotting a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphInfo {
    /// One tick per variant: `0.0, 1.0, ...`
    pub xticks: Vec<f64>,
    /// Sweep value at each tick
    pub xticklabels: Vec<String>,
    /// Axis label
    pub xlabel: String,
}

/// Expanded batch criterion
#[derive(Debug)]
pub struct BatchCriteria {
    cli_arg: String,
    spec: SweepSpec,
    values: Vec<SweepValue>,
    builder: MutationSetBuilder,
    label: String,
    changes: OnceCell<Vec<MutationSet>>,
}

impl BatchCriteria {
    /// Parse and expand a cmdline value against a template
    ///
    /// # Errors
    /// Returns any parse or expansion error; no partial criteria is produced.
    pub fn from_cli(
        cli_arg: &str,
        parser: &SweepSpecParser,
        template: MutationTemplate,
        label: impl Into<String>,
    ) -> CriteriaResult<Self> {
        let spec = parser.parse(cli_arg)?;
        Self::from_spec(spec, template, label)
    }

    /// Expand an already-parsed spec against a template
    ///
    /// # Errors
    /// Returns [`crate::CriteriaError::InvalidCardinality`] for an empty sweep.
    pub fn from_spec(
        spec: SweepSpec,
        template: MutationTemplate,
        label: impl Into<String>,
    ) -> CriteriaResult<Self> {
        let values = expand(&spec)?;
        Ok(Self {
            cli_arg: spec.raw.clone(),
            spec,
            values,
            builder: MutationSetBuilder::new(template),
            label: label.into(),
            changes: OnceCell::new(),
        })
    }

    /// Cmdline value this criteria was built from
    #[inline]
    #[must_use]
    pub fn cli_arg(&self) -> &str {
        &self.cli_arg
    }

    /// Parsed spec
    #[inline]
    #[must_use]
    pub fn spec(&self) -> &SweepSpec {
        &self.spec
    }

    /// Expanded values, in variant order
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[SweepValue] {
        &self.values
    }

    /// Number of variants in the batch
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; expansion rejects empty sweeps
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// One mutation set per variant
    ///
    /// Computed on first call and reused afterwards.
    pub fn gen_attr_changelist(&self) -> &[MutationSet] {
        self.changes
            .get_or_init(|| self.builder.build_all(&self.values))
    }

    /// Ordinal names of all variants
    #[must_use]
    pub fn gen_exp_names(&self) -> Vec<String> {
        (0..self.gen_attr_changelist().len()).map(variant_name).collect()
    }

    /// Named variants for the whole batch
    #[must_use]
    pub fn variants(&self) -> Vec<ExperimentVariant> {
        name_variants(self.gen_attr_changelist().to_vec())
    }

    /// Plot axis metadata
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn graph_info(&self) -> GraphInfo {
        GraphInfo {
            xticks: (0..self.len()).map(|i| i as f64).collect(),
            xticklabels: self.values.iter().map(ToString::to_string).collect(),
            xlabel: self.label.clone(),
        }
    }
}
