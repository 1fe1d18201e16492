//! Sweep specification grammar
//!
//! Parses `<criterion>.<min>.<max>.C<cardinality>` cmdline values into a
//! validated [`SweepSpec`].
//!
//! Numeric sections contribute their first maximal run of digits; anything
//! else in the section (unit suffixes and the like) is ignored, so
//! `maxspeed.1ms.9ms.C5` parses the same as `maxspeed.1.9.C5`.

use crate::error::{CriteriaError, CriteriaResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new("[0-9]+").expect("static regex"));
static CARDINALITY: Lazy<Regex> = Lazy::new(|| Regex::new("^C([0-9]+)").expect("static regex"));

/// Number of sections required after the criterion name
pub const SPEC_SECTIONS: usize = 3;

/// Largest accepted cardinality
pub const MAX_CARDINALITY: usize = 100_000;

/// Criterion name written into the raw text of specs built with [`SweepSpec::new`]
pub const MANUAL_SPEC_NAME: &str = "manual";

/// How a parsed range with `min > max` is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePolicy {
    /// Reject with [`CriteriaError::InvertedRange`]
    #[default]
    Strict,
    /// Accept; expansion then yields a descending sequence
    AllowDescending,
}

/// Validated sweep definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSpec {
    /// First value of the sweep
    pub min: f64,
    /// Last value of the sweep
    pub max: f64,
    /// Number of values to generate
    pub cardinality: usize,
    /// Cmdline text the spec was parsed from
    pub raw: String,
}

impl SweepSpec {
    /// Create spec directly from its parts
    ///
    /// The spec is not validated; [`crate::expand`] still rejects a
    /// cardinality outside `1..=MAX_CARDINALITY`. `raw` is synthesized under
    /// [`MANUAL_SPEC_NAME`] so that it reads as a complete cmdline value.
    #[must_use]
    pub fn new(min: f64, max: f64, cardinality: usize) -> Self {
        Self {
            min,
            max,
            cardinality,
            raw: format!("{MANUAL_SPEC_NAME}.{min}.{max}.C{cardinality}"),
        }
    }

    /// Check if the sweep runs from high to low
    #[inline]
    #[must_use]
    pub fn is_descending(&self) -> bool {
        self.min > self.max
    }
}

impl Display for SweepSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.C{}", self.min, self.max, self.cardinality)
    }
}

/// Parser for the sweep cmdline grammar
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepSpecParser {
    range_policy: RangePolicy,
}

impl SweepSpecParser {
    /// Create parser with the strict range policy
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set range policy
    #[inline]
    #[must_use]
    pub fn with_range_policy(mut self, policy: RangePolicy) -> Self {
        self.range_policy = policy;
        self
    }

    /// Active range policy
    #[inline]
    #[must_use]
    pub fn range_policy(&self) -> RangePolicy {
        self.range_policy
    }

    /// Leading criterion name of a cmdline value (text before the first `.`)
    #[inline]
    #[must_use]
    pub fn criterion_name(raw: &str) -> &str {
        raw.split('.').next().unwrap_or_default()
    }

    /// Parse a full cmdline value, including the leading criterion name
    ///
    /// # Errors
    /// - [`CriteriaError::MalformedSpec`] unless exactly three sections follow the name
    /// - [`CriteriaError::InvalidNumericToken`] if a section has no digits
    /// - [`CriteriaError::MissingCardinalityMarker`] if the last section lacks `C`
    /// - [`CriteriaError::InvalidCardinality`] if cardinality is zero or above [`MAX_CARDINALITY`]
    /// - [`CriteriaError::InvertedRange`] if `min > max` under [`RangePolicy::Strict`]
    pub fn parse(&self, raw: &str) -> CriteriaResult<SweepSpec> {
        // Drop the criterion name, leaving only the spec
        let sections: Vec<&str> = raw.split('.').skip(1).collect();
        if sections.len() != SPEC_SECTIONS {
            return Err(CriteriaError::MalformedSpec {
                raw: raw.to_string(),
                expected: SPEC_SECTIONS,
                actual: sections.len(),
            });
        }

        let min = numeric_token(raw, "min", sections[0])?;
        let max = numeric_token(raw, "max", sections[1])?;
        let cardinality = cardinality_token(raw, sections[2])?;

        if min > max {
            match self.range_policy {
                RangePolicy::Strict => {
                    return Err(CriteriaError::InvertedRange {
                        raw: raw.to_string(),
                        min,
                        max,
                    });
                }
                RangePolicy::AllowDescending => {
                    tracing::warn!(raw, min, max, "accepting descending sweep range");
                }
            }
        }

        tracing::debug!(raw, min, max, cardinality, "parsed sweep spec");
        Ok(SweepSpec {
            min,
            max,
            cardinality,
            raw: raw.to_string(),
        })
    }
}

fn numeric_token(raw: &str, field: &'static str, section: &str) -> CriteriaResult<f64> {
    DIGITS
        .find(section)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .ok_or_else(|| CriteriaError::InvalidNumericToken {
            raw: raw.to_string(),
            field,
            section: section.to_string(),
        })
}

fn cardinality_token(raw: &str, section: &str) -> CriteriaResult<usize> {
    if !section.starts_with('C') {
        return Err(CriteriaError::MissingCardinalityMarker {
            raw: raw.to_string(),
            section: section.to_string(),
        });
    }

    let cardinality = CARDINALITY
        .captures(section)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .ok_or_else(|| CriteriaError::InvalidNumericToken {
            raw: raw.to_string(),
            field: "cardinality",
            section: section.to_string(),
        })?;

    if !(1..=MAX_CARDINALITY).contains(&cardinality) {
        return Err(CriteriaError::InvalidCardinality {
            raw: raw.to_string(),
            cardinality,
        });
    }
    Ok(cardinality)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> CriteriaResult<SweepSpec> {
        SweepSpecParser::new().parse(raw)
    }

    #[test]
    fn parse_basic() {
        let spec = parse("maxspeed.1.9.C5").unwrap();
        assert_eq!(spec.min, 1.0);
        assert_eq!(spec.max, 9.0);
        assert_eq!(spec.cardinality, 5);
        assert_eq!(spec.raw, "maxspeed.1.9.C5");
    }

    #[test]
    fn parse_ignores_unit_suffixes() {
        let spec = parse("fuel.2L.10L.C3").unwrap();
        assert_eq!((spec.min, spec.max, spec.cardinality), (2.0, 10.0, 3));
    }

    #[test]
    fn parse_takes_first_digit_run() {
        let spec = parse("fuel.a12b34.x56.C2").unwrap();
        assert_eq!((spec.min, spec.max), (12.0, 56.0));
    }

    #[test]
    fn parse_too_few_sections() {
        let err = parse("maxspeed.1.9").unwrap_err();
        assert_eq!(
            err,
            CriteriaError::MalformedSpec {
                raw: "maxspeed.1.9".into(),
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn parse_too_many_sections() {
        let err = parse("maxspeed.1.9.C5.extra").unwrap_err();
        assert!(matches!(err, CriteriaError::MalformedSpec { actual: 4, .. }));
    }

    #[test]
    fn parse_name_only() {
        let err = parse("maxspeed").unwrap_err();
        assert!(matches!(err, CriteriaError::MalformedSpec { actual: 0, .. }));
    }

    #[test]
    fn parse_missing_marker_is_distinct_from_missing_digits() {
        let marker = parse("maxspeed.1.9.5").unwrap_err();
        assert!(matches!(marker, CriteriaError::MissingCardinalityMarker { .. }));

        let digits = parse("maxspeed.1.9.C").unwrap_err();
        assert!(matches!(
            digits,
            CriteriaError::InvalidNumericToken {
                field: "cardinality",
                ..
            }
        ));
    }

    #[test]
    fn parse_lowercase_marker_rejected() {
        let err = parse("maxspeed.1.9.c5").unwrap_err();
        assert!(matches!(err, CriteriaError::MissingCardinalityMarker { .. }));
    }

    #[test]
    fn parse_min_without_digits() {
        let err = parse("maxspeed.low.9.C5").unwrap_err();
        assert!(matches!(
            err,
            CriteriaError::InvalidNumericToken { field: "min", .. }
        ));
        assert_eq!(err.raw(), "maxspeed.low.9.C5");
    }

    #[test]
    fn parse_zero_cardinality() {
        let err = parse("maxspeed.1.9.C0").unwrap_err();
        assert!(matches!(
            err,
            CriteriaError::InvalidCardinality { cardinality: 0, .. }
        ));
    }

    #[test]
    fn parse_oversized_cardinality() {
        let err = parse("maxspeed.1.9.C18446744073709551615").unwrap_err();
        assert!(matches!(
            err,
            CriteriaError::InvalidCardinality { cardinality: usize::MAX, .. }
        ));

        let limit = format!("maxspeed.1.9.C{MAX_CARDINALITY}");
        assert_eq!(parse(&limit).unwrap().cardinality, MAX_CARDINALITY);
        let over = format!("maxspeed.1.9.C{}", MAX_CARDINALITY + 1);
        assert!(matches!(
            parse(&over),
            Err(CriteriaError::InvalidCardinality { .. })
        ));
    }

    #[test]
    fn manual_spec_raw_reparses() {
        let spec = SweepSpec::new(1.0, 9.0, 5);
        assert_eq!(spec.raw, "manual.1.9.C5");
        let reparsed = parse(&spec.raw).unwrap();
        assert_eq!((reparsed.min, reparsed.max, reparsed.cardinality), (1.0, 9.0, 5));
    }

    #[test]
    fn parse_inverted_range_strict() {
        let err = parse("maxspeed.9.1.C5").unwrap_err();
        assert!(matches!(err, CriteriaError::InvertedRange { .. }));
    }

    #[test]
    fn parse_inverted_range_allowed() {
        let parser = SweepSpecParser::new().with_range_policy(RangePolicy::AllowDescending);
        let spec = parser.parse("maxspeed.9.1.C5").unwrap();
        assert!(spec.is_descending());
    }

    #[test]
    fn criterion_name_is_leading_section() {
        assert_eq!(SweepSpecParser::criterion_name("fuel.1.9.C5"), "fuel");
        assert_eq!(SweepSpecParser::criterion_name("fuel"), "fuel");
        assert_eq!(SweepSpecParser::criterion_name(""), "");
    }

    #[test]
    fn spec_display() {
        assert_eq!(SweepSpec::new(1.0, 9.0, 5).to_string(), "1.9.C5");
    }
}
