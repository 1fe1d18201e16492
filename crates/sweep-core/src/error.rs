//! Error types for sweep orchestration
//!
//! Provides error handling for:
//! - Configuration loading
//! - Experiment setup parsing
//! - Aggregation of criteria and scenario failures

use std::path::PathBuf;
use sweep_criteria::CriteriaError;
use sweep_expdef::ApplyError;
use sweep_scenario::ScenarioError;

/// Errors while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension is not a supported format
    #[error("unsupported config format for {path} (expected .toml, .yaml, .yml or .json)")]
    UnsupportedFormat { path: PathBuf },

    /// TOML syntax or schema error
    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// YAML syntax or schema error
    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// JSON syntax or schema error
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors while parsing an experiment setup value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpSetupError {
    /// First section is not `T<secs>`
    #[error("experiment setup '{raw}' must start with T<seconds>")]
    MissingDuration { raw: String },

    /// Section with an unrecognized prefix
    #[error("unknown section '{section}' in experiment setup '{raw}' (expected K<ticks> or N<datapoints>)")]
    UnknownSection { raw: String, section: String },

    /// Section prefix without usable digits
    #[error("no usable digits in section '{section}' of experiment setup '{raw}'")]
    InvalidNumericToken { raw: String, section: String },

    /// Same section given twice
    #[error("section '{section}' repeated in experiment setup '{raw}'")]
    DuplicateSection { raw: String, section: String },

    /// Duration or tick rate of zero
    #[error("section '{section}' of experiment setup '{raw}' must be non-zero")]
    ZeroValue { raw: String, section: String },
}

/// Combined orchestration error
#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    #[error("batch criteria error: {0}")]
    Criteria(#[from] CriteriaError),

    #[error("scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    #[error("experiment setup error: {0}")]
    ExpSetup(#[from] ExpSetupError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("apply error: {0}")]
    Apply(#[from] ApplyError),
}

impl SweepError {
    /// Check if the error was caused by user-supplied input or configuration
    ///
    /// Malformed input is never transient; nothing here is worth retrying.
    #[inline]
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        match self {
            Self::Criteria(_) | Self::ExpSetup(_) | Self::Config(_) => true,
            Self::Scenario(e) => e.is_input_error(),
            Self::Apply(_) => false,
        }
    }
}

/// Result type alias for orchestration operations
pub type SweepResult<T> = Result<T, SweepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criteria_error_conversion() {
        let err: SweepError = CriteriaError::InvalidCardinality {
            raw: "x.1.2.C0".into(),
            cardinality: 0,
        }
        .into();
        assert!(matches!(err, SweepError::Criteria(_)));
        assert!(err.is_user_error());
    }

    #[test]
    fn scenario_registry_error_is_not_user_error() {
        let err: SweepError = ScenarioError::UnknownGenerator {
            raw: "A.1x1x1".into(),
            name: "gen".into(),
        }
        .into();
        assert!(!err.is_user_error());
    }

    #[test]
    fn exp_setup_display() {
        let err = ExpSetupError::MissingDuration { raw: "K5".into() };
        assert_eq!(
            err.to_string(),
            "experiment setup 'K5' must start with T<seconds>"
        );
    }
}
