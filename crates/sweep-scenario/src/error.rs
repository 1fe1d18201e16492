//! Error types for scenario resolution

/// Errors raised while resolving a scenario name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScenarioError {
    /// No registered pattern matches
    #[error("unrecognized scenario '{raw}': no registered pattern matches")]
    UnrecognizedScenario { raw: String },

    /// A pattern matched but no `<X>x<Y>x<Z>` dimensions were found
    #[error("bad arena dimensions in scenario '{raw}' (tag '{tag}'): expected <X>x<Y>x<Z>")]
    MissingDimensions { raw: String, tag: String },

    /// Dimension digits do not fit an integer
    #[error("dimension '{token}' in scenario '{raw}' is out of range")]
    InvalidDimension { raw: String, token: String },

    /// Pattern regex does not compile
    #[error("invalid scenario pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// No handler registered under a generator name
    #[error("no generator named '{name}' for scenario '{raw}'")]
    UnknownGenerator { raw: String, name: String },
}

impl ScenarioError {
    /// Check if the error stems from the scenario text (rather than the registry)
    #[inline]
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::UnrecognizedScenario { .. }
                | Self::MissingDimensions { .. }
                | Self::InvalidDimension { .. }
        )
    }
}

/// Result type alias for scenario operations
pub type ScenarioResult<T> = Result<T, ScenarioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_display() {
        let err = ScenarioError::UnrecognizedScenario {
            raw: "garbage".into(),
        };
        assert_eq!(
            err.to_string(),
            "unrecognized scenario 'garbage': no registered pattern matches"
        );
    }

    #[test]
    fn input_error_classification() {
        assert!(ScenarioError::MissingDimensions {
            raw: "a".into(),
            tag: "b".into()
        }
        .is_input_error());
        assert!(!ScenarioError::InvalidPattern {
            pattern: "(".into(),
            message: String::new()
        }
        .is_input_error());
    }
}
