//! Sweep expansion
//!
//! Linear interpolation from `min` to `max`, endpoints included.

use crate::error::{CriteriaError, CriteriaResult};
use crate::spec::{SweepSpec, MAX_CARDINALITY};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// One point of an expanded sweep
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SweepValue(pub f64);

impl SweepValue {
    /// Underlying value
    #[inline]
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Locale-independent attribute text
    ///
    /// Shortest representation that parses back to the identical `f64`, never
    /// in scientific notation. Integral values keep a trailing `.0` so `3.0`
    /// renders as `3.0`, not `3`.
    #[must_use]
    pub fn to_attr_string(self) -> String {
        if self.0.is_finite() && self.0.fract() == 0.0 {
            format!("{:.1}", self.0)
        } else {
            format!("{}", self.0)
        }
    }
}

impl Display for SweepValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_attr_string())
    }
}

impl From<f64> for SweepValue {
    fn from(v: f64) -> Self {
        Self(v)
    }
}

/// Expand a spec into exactly `cardinality` evenly spaced values
///
/// The last value is pinned to `max` so interpolation rounding never drifts
/// off the requested endpoint.
///
/// # Errors
/// Returns [`CriteriaError::InvalidCardinality`] if `cardinality` is zero or
/// above [`MAX_CARDINALITY`].
#[allow(clippy::cast_precision_loss)]
pub fn expand(spec: &SweepSpec) -> CriteriaResult<Vec<SweepValue>> {
    let n = spec.cardinality;
    if !(1..=MAX_CARDINALITY).contains(&n) {
        return Err(CriteriaError::InvalidCardinality {
            raw: spec.raw.clone(),
            cardinality: n,
        });
    }
    let values = match n {
        1 => vec![SweepValue(spec.min)],
        _ => {
            let step = (spec.max - spec.min) / (n - 1) as f64;
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        SweepValue(spec.max)
                    } else {
                        SweepValue(spec.min + step * i as f64)
                    }
                })
                .collect()
        }
    };

    tracing::debug!(spec = %spec, count = values.len(), "expanded sweep");
    Ok(values)
}
