//! Criterion catalog
//!
//! Maps the leading name of a cmdline value (`fuel` in `fuel.1.9.C5`) to the
//! template and axis label that criterion uses.

use crate::criteria::BatchCriteria;
use crate::error::{CriteriaError, CriteriaResult};
use crate::spec::SweepSpecParser;
use crate::template::MutationTemplate;
use serde::{Deserialize, Serialize};

/// Definition of one named batch criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionDef {
    /// Name matched against the leading cmdline section
    pub name: String,
    /// Plot axis label
    pub label: String,
    /// Attributes written for each sweep value
    pub template: MutationTemplate,
}

impl CriterionDef {
    /// Create definition
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>, template: MutationTemplate) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            template,
        }
    }

    /// Max robot speed: `.//wheel_turning/@max_speed`
    #[must_use]
    pub fn max_speed() -> Self {
        Self::new(
            "maxspeed",
            "Max robot speeds",
            MutationTemplate::new().swept(".//wheel_turning", "max_speed"),
        )
    }

    /// Agent fuel: `fuel/@level` plus constant `fuel/@type=gasoline`
    #[must_use]
    pub fn fuel() -> Self {
        Self::new(
            "fuel",
            "Fuel levels",
            MutationTemplate::new()
                .swept("fuel", "level")
                .constant("fuel", "type", "gasoline"),
        )
    }
}

/// Registry of criterion definitions
///
/// Registering a name that already exists replaces the earlier definition in
/// place.
#[derive(Debug, Clone, Default)]
pub struct CriteriaCatalog {
    defs: Vec<CriterionDef>,
}

impl CriteriaCatalog {
    /// Create empty catalog
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with built-in criteria
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        catalog.register(CriterionDef::max_speed());
        catalog.register(CriterionDef::fuel());
        catalog
    }

    /// Register a definition
    pub fn register(&mut self, def: CriterionDef) {
        match self.defs.iter_mut().find(|d| d.name == def.name) {
            Some(existing) => *existing = def,
            None => self.defs.push(def),
        }
    }

    /// Look up a definition by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CriterionDef> {
        self.defs.iter().find(|d| d.name == name)
    }

    /// Registered names, in registration order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.defs.iter().map(|d| d.name.as_str()).collect()
    }

    /// Number of definitions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Check if catalog is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Build criteria from a full cmdline value
    ///
    /// # Errors
    /// Returns [`CriteriaError::UnknownCriterion`] if the leading name is not
    /// registered, otherwise any parse or expansion error.
    pub fn factory(&self, cli_arg: &str, parser: &SweepSpecParser) -> CriteriaResult<BatchCriteria> {
        let name = SweepSpecParser::criterion_name(cli_arg);
        let def = self
            .get(name)
            .ok_or_else(|| CriteriaError::UnknownCriterion {
                raw: cli_arg.to_string(),
                name: name.to_string(),
            })?;

        tracing::info!(criterion = %def.name, cli_arg, "building batch criteria");
        BatchCriteria::from_cli(cli_arg, parser, def.template.clone(), def.label.clone())
    }
}
