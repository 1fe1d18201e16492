//! Paths for addressing elements within experiment definitions
//!
//! Provides [`ExpDefPath`], an opaque address handed through to the document
//! consumer. Addressing syntax (XPath-like `.//wheel_turning`, JSONPath-like
//! `$.exp_setup`, bare element names) belongs to the consumer, so paths are
//! never normalized or validated here.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Opaque path within an experiment definition
///
/// # Examples
/// - `.//wheel_turning` (XML definitions)
/// - `$.exp_setup` (JSON definitions)
/// - `fuel` (flat definitions)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpDefPath(String);

impl ExpDefPath {
    /// Create path from its raw text
    #[inline]
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw path text, exactly as supplied
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if path is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume into the raw path text
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for ExpDefPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ExpDefPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for ExpDefPath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ExpDefPath {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl AsRef<str> for ExpDefPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_passes_through_unchanged() {
        for raw in [".//wheel_turning", "$.exp_setup", "fuel", "a..b", ""] {
            let path = ExpDefPath::new(raw);
            assert_eq!(path.as_str(), raw);
            assert_eq!(path.to_string(), raw);
        }
    }

    #[test]
    fn path_from_str_is_infallible() {
        let path: ExpDefPath = ".//arena".parse().unwrap();
        assert_eq!(path, ExpDefPath::from(".//arena"));
    }

    #[test]
    fn path_empty() {
        assert!(ExpDefPath::new("").is_empty());
        assert!(!ExpDefPath::new("fuel").is_empty());
    }

    #[test]
    fn path_serializes_as_plain_string() {
        let path = ExpDefPath::new("$.exp_setup");
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"$.exp_setup\"");
    }
}
