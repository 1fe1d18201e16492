//! Error types for batch criteria
//!
//! Every variant carries the raw cmdline text it was raised for. All errors
//! are terminal for the criterion being processed; nothing is defaulted.

/// Errors raised while parsing or expanding a batch criterion
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CriteriaError {
    /// Wrong number of `.`-separated sections after the criterion name
    #[error("spec must have {expected} sections separated by '.'; have {actual} from '{raw}'")]
    MalformedSpec {
        raw: String,
        expected: usize,
        actual: usize,
    },

    /// Cardinality section does not start with `C`
    #[error("bad cardinality in criteria section '{section}' of '{raw}': missing 'C' prefix")]
    MissingCardinalityMarker { raw: String, section: String },

    /// Section expected to hold digits holds none (or too many to represent)
    #[error("bad {field} in criteria section '{section}' of '{raw}': no usable digits")]
    InvalidNumericToken {
        raw: String,
        field: &'static str,
        section: String,
    },

    /// Cardinality outside `1..=MAX_CARDINALITY`
    #[error(
        "cardinality must be between 1 and {}, got {cardinality} from '{raw}'",
        crate::spec::MAX_CARDINALITY
    )]
    InvalidCardinality { raw: String, cardinality: usize },

    /// `min > max` under the strict range policy
    #[error("min {min} exceeds max {max} in '{raw}'")]
    InvertedRange { raw: String, min: f64, max: f64 },

    /// No criterion registered under the leading name
    #[error("unknown batch criterion '{name}' in '{raw}'")]
    UnknownCriterion { raw: String, name: String },
}

impl CriteriaError {
    /// Raw cmdline text the error was raised for
    #[must_use]
    pub fn raw(&self) -> &str {
        match self {
            Self::MalformedSpec { raw, .. }
            | Self::MissingCardinalityMarker { raw, .. }
            | Self::InvalidNumericToken { raw, .. }
            | Self::InvalidCardinality { raw, .. }
            | Self::InvertedRange { raw, .. }
            | Self::UnknownCriterion { raw, .. } => raw,
        }
    }
}

/// Result type alias for criteria operations
pub type CriteriaResult<T> = Result<T, CriteriaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_display() {
        let err = CriteriaError::MalformedSpec {
            raw: "maxspeed.1.9".to_string(),
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "spec must have 3 sections separated by '.'; have 2 from 'maxspeed.1.9'"
        );
    }

    #[test]
    fn raw_is_available_for_every_kind() {
        let errs = [
            CriteriaError::MissingCardinalityMarker {
                raw: "a".into(),
                section: "5".into(),
            },
            CriteriaError::InvalidNumericToken {
                raw: "a".into(),
                field: "min",
                section: "x".into(),
            },
            CriteriaError::InvalidCardinality {
                raw: "a".into(),
                cardinality: 0,
            },
        ];
        for err in errs {
            assert_eq!(err.raw(), "a");
        }
    }
}
