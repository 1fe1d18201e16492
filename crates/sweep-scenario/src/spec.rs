//! Parsed scenario identity
//!
//! Scenario strings look like `<Tag>.<X>x<Y>x<Z>[+<suffix>]`.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Arena dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Dimensions {
    /// Create dimensions
    #[inline]
    #[must_use]
    pub fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}

/// What happens to a `+suffix` trailing the dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuffixPolicy {
    /// Suffix is dropped
    #[default]
    Discard,
    /// Suffix is kept on [`ScenarioSpec::suffix`]
    Retain,
}

/// Resolved scenario
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScenarioSpec {
    /// Canonical tag of the matching pattern
    pub tag: String,
    /// Arena dimensions
    pub dims: Dimensions,
    /// Text after the first `+`, under [`SuffixPolicy::Retain`]
    pub suffix: Option<String>,
}

impl ScenarioSpec {
    /// Canonical identity `<tag>.<X>x<Y>x<Z>`; never includes the suffix
    #[must_use]
    pub fn canonical_name(&self) -> String {
        format!("{}.{}", self.tag, self.dims)
    }
}

impl Display for ScenarioSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.tag, self.dims)?;
        if let Some(suffix) = &self.suffix {
            write!(f, "+{suffix}")?;
        }
        Ok(())
    }
}

/// Split `raw` at the first `+`
#[must_use]
pub fn split_suffix(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once('+') {
        Some((head, tail)) => (head, Some(tail)),
        None => (raw, None),
    }
}
