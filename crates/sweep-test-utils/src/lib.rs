//! Testing utilities for the sweep workspace
//!
//! Shared test helpers, fixtures, and assertions.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};
use sweep_criteria::{CriterionDef, MutationTemplate, SweepValue};
use sweep_expdef::{AttrTree, MutationSet};
use sweep_scenario::{ScenarioPatternDef, ARENA_PATH};

/// TOML layer adding a criterion and a scenario family
pub const SAMPLE_TOML: &str = r#"
range_policy = "allow_descending"
name_cache_capacity = 8

[exp_setup]
n_ticks_per_sec = 10

[[criteria]]
name = "swarmsize"
label = "Swarm size"
template = [
    { path = ".//arrangement/distribute/entity", key = "quantity" },
]

[[scenarios]]
regex = "Cave"
tag = "Cave"
generator = "houseworld_all_exp"
"#;

/// YAML layer overriding the suffix policy and the datapoint count
pub const SAMPLE_YAML: &str = "
suffix_policy: retain
exp_setup:
  n_datapoints: 25
";

/// Write `contents` to `dir/name` and return the path
pub fn write_config(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

pub fn swarm_size_criterion() -> CriterionDef {
    CriterionDef::new(
        "swarmsize",
        "Swarm size",
        MutationTemplate::new().swept(".//arrangement/distribute/entity", "quantity"),
    )
}

pub fn cave_scenario() -> ScenarioPatternDef {
    ScenarioPatternDef {
        regex: "Cave".into(),
        tag: "Cave".into(),
        generator: "houseworld_all_exp".into(),
    }
}

/// Strict tree knowing every element the built-ins write to
pub fn strict_exp_def() -> AttrTree {
    AttrTree::strict([
        ARENA_PATH,
        ".//wheel_turning",
        "fuel",
        "$.exp_setup",
        ".//arrangement/distribute/entity",
    ])
}

/// Values written by a batch, one per variant, for a single attribute
pub fn swept_values(sets: &[MutationSet], path: &str, key: &str) -> Vec<String> {
    sets.iter()
        .map(|set| set.find(path, key).unwrap().value.clone())
        .collect()
}

/// Assert an evenly spaced sequence with pinned endpoints
pub fn assert_linspace(values: &[SweepValue], min: f64, max: f64, n: usize) {
    assert_eq!(values.len(), n, "cardinality");
    assert_eq!(values[0].get(), min, "first value");
    assert_eq!(values[n - 1].get(), max, "last value");
    if n > 2 {
        let step = values[1].get() - values[0].get();
        for pair in values.windows(2) {
            let d = pair[1].get() - pair[0].get();
            assert!((d - step).abs() <= 1e-9 * step.abs().max(1.0), "uneven step {d} vs {step}");
        }
    }
}
