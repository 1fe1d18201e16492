//! Mutation templates
//!
//! A [`MutationTemplate`] lists, in replay order, which attributes a sweep
//! value is written to and which constant companion attributes ride along
//! with it. [`MutationSetBuilder`] renders one [`MutationSet`] per value.

use crate::expand::SweepValue;
use serde::{Deserialize, Serialize};
use sweep_expdef::{AttrMutation, ExpDefPath, MutationSet};

/// One slot of a mutation template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateEntry {
    /// Fixed attribute value, identical for every variant
    Constant {
        path: ExpDefPath,
        key: String,
        value: String,
    },
    /// Attribute set to the stringified sweep value
    Swept { path: ExpDefPath, key: String },
}

impl TemplateEntry {
    /// Render this slot for one sweep value
    #[must_use]
    pub fn render(&self, sweep: SweepValue) -> AttrMutation {
        match self {
            Self::Swept { path, key } => {
                AttrMutation::new(path.clone(), key.clone(), sweep.to_attr_string())
            }
            Self::Constant { path, key, value } => {
                AttrMutation::new(path.clone(), key.clone(), value.clone())
            }
        }
    }

    /// Check if this slot depends on the sweep value
    #[inline]
    #[must_use]
    pub fn is_swept(&self) -> bool {
        matches!(self, Self::Swept { .. })
    }
}

/// Ordered list of template slots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MutationTemplate {
    entries: Vec<TemplateEntry>,
}

impl MutationTemplate {
    /// Create empty template
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Template writing the sweep value to each `(path, key)` pair, in order
    #[must_use]
    pub fn from_pairs<I, P, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, K)>,
        P: Into<ExpDefPath>,
        K: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(path, key)| TemplateEntry::Swept {
                    path: path.into(),
                    key: key.into(),
                })
                .collect(),
        }
    }

    /// Append a value-derived slot
    #[inline]
    #[must_use]
    pub fn swept(mut self, path: impl Into<ExpDefPath>, key: impl Into<String>) -> Self {
        self.entries.push(TemplateEntry::Swept {
            path: path.into(),
            key: key.into(),
        });
        self
    }

    /// Append a constant companion slot
    #[inline]
    #[must_use]
    pub fn constant(
        mut self,
        path: impl Into<ExpDefPath>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.entries.push(TemplateEntry::Constant {
            path: path.into(),
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Template slots in replay order
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    /// Number of slots
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if template has no slots
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Renders mutation sets from a template
#[derive(Debug, Clone)]
pub struct MutationSetBuilder {
    template: MutationTemplate,
}

impl MutationSetBuilder {
    /// Create builder for a template
    #[inline]
    #[must_use]
    pub fn new(template: MutationTemplate) -> Self {
        Self { template }
    }

    /// Underlying template
    #[inline]
    #[must_use]
    pub fn template(&self) -> &MutationTemplate {
        &self.template
    }

    /// One mutation per template slot, in template order
    #[must_use]
    pub fn build(&self, value: SweepValue) -> MutationSet {
        build(value, &self.template)
    }

    /// One mutation set per value, in value order
    #[must_use]
    pub fn build_all(&self, values: &[SweepValue]) -> Vec<MutationSet> {
        values.iter().map(|&v| self.build(v)).collect()
    }
}

/// One mutation per template slot, in template order
#[must_use]
pub fn build(value: SweepValue, template: &MutationTemplate) -> MutationSet {
    template
        .entries()
        .iter()
        .map(|entry| entry.render(value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fuel_template() -> MutationTemplate {
        MutationTemplate::new()
            .swept("fuel", "level")
            .constant("fuel", "type", "gasoline")
    }

    #[test]
    fn build_preserves_template_order() {
        let set = build(SweepValue(3.0), &fuel_template());
        let rendered: Vec<_> = set.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["fuel/@level=3.0", "fuel/@type=gasoline"]);
    }

    #[test]
    fn constant_first_is_respected() {
        let template = MutationTemplate::new()
            .constant("fuel", "type", "diesel")
            .swept("fuel", "level");
        let set = build(SweepValue(1.0), &template);
        assert_eq!(set.as_slice()[0].key, "type");
        assert_eq!(set.as_slice()[1].value, "1.0");
    }

    #[test]
    fn from_pairs_sweeps_every_pair() {
        let template = MutationTemplate::from_pairs([
            (".//wheel_turning", "max_speed"),
            (".//wheel_turning", "hard_turn_angle_threshold"),
        ]);
        assert!(template.entries().iter().all(TemplateEntry::is_swept));

        let set = build(SweepValue(7.0), &template);
        assert!(set.iter().all(|m| m.value == "7.0"));
    }

    #[test]
    fn empty_template_builds_empty_set() {
        assert!(build(SweepValue(1.0), &MutationTemplate::new()).is_empty());
    }

    #[test]
    fn build_all_one_set_per_value() {
        let builder = MutationSetBuilder::new(fuel_template());
        let sets = builder.build_all(&[SweepValue(1.0), SweepValue(2.0)]);
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[1].find("fuel", "level").unwrap().value, "2.0");
    }

    #[test]
    fn template_entry_deserializes_untagged() {
        let json = r#"[
            {"path": "fuel", "key": "level"},
            {"path": "fuel", "key": "type", "value": "gasoline"}
        ]"#;
        let template: MutationTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(template, fuel_template());
    }
}
