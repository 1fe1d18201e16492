//! Scenario pattern registry
//!
//! Provides [`ScenarioRegistry`]: an ordered list of [`ScenarioPattern`]s that
//! classify a raw scenario string. Patterns are tried in registration order
//! and the first whose regex matches wins; there is no best-match ranking.

use crate::error::{ScenarioError, ScenarioResult};
use crate::spec::{split_suffix, Dimensions, ScenarioSpec, SuffixPolicy};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static DIMENSIONS: Lazy<Regex> =
    Lazy::new(|| Regex::new("([0-9]+)x([0-9]+)x([0-9]+)").expect("static regex"));

/// Textual form of a [`ScenarioPattern`], as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioPatternDef {
    /// Regex searched for anywhere in the scenario string
    pub regex: String,
    /// Short tag reported for matches
    pub tag: String,
    /// Generator responsible for the scenario family
    pub generator: String,
}

/// Compiled registry entry
#[derive(Debug, Clone)]
pub struct ScenarioPattern {
    regex: Regex,
    canonical_tag: String,
    generator_name: String,
}

impl ScenarioPattern {
    /// Compile a pattern
    ///
    /// # Errors
    /// Returns [`ScenarioError::InvalidPattern`] if `regex` does not compile.
    pub fn new(
        regex: &str,
        canonical_tag: impl Into<String>,
        generator_name: impl Into<String>,
    ) -> ScenarioResult<Self> {
        let compiled = Regex::new(regex).map_err(|e| ScenarioError::InvalidPattern {
            pattern: regex.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            regex: compiled,
            canonical_tag: canonical_tag.into(),
            generator_name: generator_name.into(),
        })
    }

    /// Pattern matching exactly the literal tag text
    ///
    /// Infallible: `regex::escape` output always compiles, so unlike
    /// [`ScenarioPattern::new`] this does not return a result.
    #[must_use]
    pub fn literal(tag: &str, generator_name: impl Into<String>) -> Self {
        Self {
            // escaped text has no metacharacters left
            regex: Regex::new(&regex::escape(tag)).expect("escaped literal is a valid regex"),
            canonical_tag: tag.to_string(),
            generator_name: generator_name.into(),
        }
    }

    /// Check if the pattern matches anywhere in `raw`
    #[inline]
    #[must_use]
    pub fn is_match(&self, raw: &str) -> bool {
        self.regex.is_match(raw)
    }

    /// Source regex
    #[inline]
    #[must_use]
    pub fn regex(&self) -> &str {
        self.regex.as_str()
    }

    /// Canonical tag
    #[inline]
    #[must_use]
    pub fn canonical_tag(&self) -> &str {
        &self.canonical_tag
    }

    /// Generator name
    #[inline]
    #[must_use]
    pub fn generator_name(&self) -> &str {
        &self.generator_name
    }
}

impl TryFrom<&ScenarioPatternDef> for ScenarioPattern {
    type Error = ScenarioError;

    fn try_from(def: &ScenarioPatternDef) -> ScenarioResult<Self> {
        Self::new(&def.regex, def.tag.clone(), def.generator.clone())
    }
}

/// Result of resolving a scenario string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Name to look up in the generator dispatch table
    pub generator: String,
    /// Parsed scenario identity
    pub spec: ScenarioSpec,
}

/// Resolve `raw` against an ordered pattern list
///
/// # Errors
/// - [`ScenarioError::UnrecognizedScenario`] if no pattern matches
/// - [`ScenarioError::MissingDimensions`] if a pattern matches but no
///   `<X>x<Y>x<Z>` appears before the first `+`
/// - [`ScenarioError::InvalidDimension`] if a dimension overflows
pub fn resolve(
    raw: &str,
    patterns: &[ScenarioPattern],
    suffix_policy: SuffixPolicy,
) -> ScenarioResult<Resolution> {
    let pattern = patterns
        .iter()
        .find(|p| p.is_match(raw))
        .ok_or_else(|| ScenarioError::UnrecognizedScenario {
            raw: raw.to_string(),
        })?;

    let (head, suffix) = split_suffix(raw);
    let caps = DIMENSIONS
        .captures(head)
        .ok_or_else(|| ScenarioError::MissingDimensions {
            raw: raw.to_string(),
            tag: pattern.canonical_tag.clone(),
        })?;

    let dim = |i: usize| -> ScenarioResult<u32> {
        let token = &caps[i];
        token
            .parse::<u32>()
            .map_err(|_| ScenarioError::InvalidDimension {
                raw: raw.to_string(),
                token: token.to_string(),
            })
    };
    let dims = Dimensions::new(dim(1)?, dim(2)?, dim(3)?);

    let suffix = match suffix_policy {
        SuffixPolicy::Discard => None,
        SuffixPolicy::Retain => suffix.map(str::to_string),
    };

    let spec = ScenarioSpec {
        tag: pattern.canonical_tag.clone(),
        dims,
        suffix,
    };
    tracing::debug!(
        raw,
        scenario = %spec.canonical_name(),
        generator = %pattern.generator_name,
        "resolved scenario"
    );

    Ok(Resolution {
        generator: pattern.generator_name.clone(),
        spec,
    })
}

/// Ordered scenario pattern registry
///
/// Read-only once built; share it freely across threads.
#[derive(Debug, Clone, Default)]
pub struct ScenarioRegistry {
    patterns: Vec<ScenarioPattern>,
    suffix_policy: SuffixPolicy,
}

impl ScenarioRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create registry with built-in scenario families
    ///
    /// # Order
    /// `LowBlockCount`, `HighBlockCount`, `HouseWorld`, `scenario1`, `scenario2`
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ScenarioPattern::literal(
            "LowBlockCount",
            "low_block_count_foraging",
        ));
        registry.register(ScenarioPattern::literal(
            "HighBlockCount",
            "high_block_count_foraging",
        ));
        registry.register(ScenarioPattern::literal("HouseWorld", "houseworld_all_exp"));
        registry.register(ScenarioPattern::literal("scenario1", "generate_pewpew1"));
        registry.register(ScenarioPattern::literal("scenario2", "generate_pewpew2"));
        registry
    }

    /// Set suffix policy
    #[inline]
    #[must_use]
    pub fn with_suffix_policy(mut self, policy: SuffixPolicy) -> Self {
        self.suffix_policy = policy;
        self
    }

    /// Active suffix policy
    #[inline]
    #[must_use]
    pub fn suffix_policy(&self) -> SuffixPolicy {
        self.suffix_policy
    }

    /// Append a pattern; it is tried after every earlier registration
    pub fn register(&mut self, pattern: ScenarioPattern) {
        self.patterns.push(pattern);
    }

    /// Compile and append a pattern definition
    ///
    /// # Errors
    /// Returns [`ScenarioError::InvalidPattern`] if the regex does not compile.
    pub fn register_def(&mut self, def: &ScenarioPatternDef) -> ScenarioResult<()> {
        self.register(ScenarioPattern::try_from(def)?);
        Ok(())
    }

    /// Registered patterns, in match order
    #[inline]
    #[must_use]
    pub fn patterns(&self) -> &[ScenarioPattern] {
        &self.patterns
    }

    /// Registered generator names, in match order
    #[must_use]
    pub fn generator_names(&self) -> Vec<&str> {
        self.patterns.iter().map(ScenarioPattern::generator_name).collect()
    }

    /// Get number of registered patterns
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Resolve a scenario string with this registry's suffix policy
    ///
    /// # Errors
    /// See [`resolve`].
    pub fn resolve(&self, raw: &str) -> ScenarioResult<Resolution> {
        resolve(raw, &self.patterns, self.suffix_policy)
    }
}
