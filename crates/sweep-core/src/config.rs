//! Layered sweep configuration
//!
//! Precedence, lowest first: built-in defaults, configuration file,
//! command-line flags. Each layer is a [`SweepConfig`] with optional fields;
//! [`SweepConfig::merge`] folds them and [`SweepConfig::resolved`] fills the
//! gaps with defaults.

use crate::error::ConfigError;
use crate::exp_setup::{ExpSetup, ExpSetupOverrides};
use serde::{Deserialize, Serialize};
use std::path::Path;
use sweep_criteria::variant::DEFAULT_NAME_CACHE_CAPACITY;
use sweep_criteria::{CriterionDef, RangePolicy};
use sweep_scenario::{ScenarioPatternDef, SuffixPolicy};

/// One configuration layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// How to treat `min > max` in sweep specs
    pub range_policy: Option<RangePolicy>,
    /// Whether to keep `+suffix` on scenario names
    pub suffix_policy: Option<SuffixPolicy>,
    /// Experiment setup defaults
    pub exp_setup: Option<ExpSetupOverrides>,
    /// Capacity of the variant-name cache
    pub name_cache_capacity: Option<u64>,
    /// Additional criteria; a name shared with a built-in replaces it
    pub criteria: Vec<CriterionDef>,
    /// Additional scenario patterns, tried after the built-ins
    pub scenarios: Vec<ScenarioPatternDef>,
}

impl SweepConfig {
    /// Create empty layer
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With range policy
    #[inline]
    #[must_use]
    pub fn with_range_policy(mut self, policy: RangePolicy) -> Self {
        self.range_policy = Some(policy);
        self
    }

    /// With suffix policy
    #[inline]
    #[must_use]
    pub fn with_suffix_policy(mut self, policy: SuffixPolicy) -> Self {
        self.suffix_policy = Some(policy);
        self
    }

    /// With experiment setup overrides
    #[inline]
    #[must_use]
    pub fn with_exp_setup(mut self, overrides: ExpSetupOverrides) -> Self {
        self.exp_setup = Some(overrides);
        self
    }

    /// Load a layer from a `.toml`, `.yaml`/`.yml` or `.json` file
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file cannot be read, has an unknown
    /// extension, or does not deserialize.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        // Reject unknown formats before touching the filesystem
        if !matches!(ext.as_deref(), Some("toml" | "yaml" | "yml" | "json")) {
            return Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = match ext.as_deref() {
            Some("toml") => toml::from_str(&text).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            })?,
            Some("json") => serde_json::from_str(&text).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?,
            _ => serde_yaml::from_str(&text).map_err(|source| ConfigError::Yaml {
                path: path.to_path_buf(),
                source,
            })?,
        };

        tracing::info!(path = %path.display(), "loaded sweep configuration");
        Ok(config)
    }

    /// Fold a later layer over this one
    ///
    /// Scalar fields set in `later` win. Criteria and scenario lists are
    /// concatenated with this layer's entries first.
    #[must_use]
    pub fn merge(mut self, later: Self) -> Self {
        let exp_setup = match (self.exp_setup, later.exp_setup) {
            (Some(a), Some(b)) => Some(a.merge(b)),
            (a, b) => b.or(a),
        };
        self.criteria.extend(later.criteria);
        self.scenarios.extend(later.scenarios);

        Self {
            range_policy: later.range_policy.or(self.range_policy),
            suffix_policy: later.suffix_policy.or(self.suffix_policy),
            exp_setup,
            name_cache_capacity: later.name_cache_capacity.or(self.name_cache_capacity),
            criteria: self.criteria,
            scenarios: self.scenarios,
        }
    }

    /// Fill unset fields with defaults
    #[must_use]
    pub fn resolved(self) -> ResolvedConfig {
        ResolvedConfig {
            range_policy: self.range_policy.unwrap_or_default(),
            suffix_policy: self.suffix_policy.unwrap_or_default(),
            exp_setup: self
                .exp_setup
                .unwrap_or_default()
                .apply_to(ExpSetup::default()),
            name_cache_capacity: self
                .name_cache_capacity
                .unwrap_or(DEFAULT_NAME_CACHE_CAPACITY),
            criteria: self.criteria,
            scenarios: self.scenarios,
        }
    }
}

/// Configuration with every field decided
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfig {
    pub range_policy: RangePolicy,
    pub suffix_policy: SuffixPolicy,
    pub exp_setup: ExpSetup,
    pub name_cache_capacity: u64,
    pub criteria: Vec<CriterionDef>,
    pub scenarios: Vec<ScenarioPatternDef>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        SweepConfig::default().resolved()
    }
}
