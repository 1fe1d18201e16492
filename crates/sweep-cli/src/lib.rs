//! Sweep CLI
//!
//! Argument parsing and command dispatch for the `sweep` binary. Every
//! command produces a JSON document; the binary prints it to stdout and
//! keeps logs on stderr.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use sweep_core::{render, BatchPlan, ResolvedConfig, SweepConfig};
use sweep_criteria::RangePolicy;
use sweep_expdef::{AttrTree, MutationSet};
use sweep_scenario::{Dimensions, SuffixPolicy};
use tracing_subscriber::EnvFilter;

/// Expand batch criteria into experiment variants
#[derive(Debug, Parser)]
#[command(name = "sweep", version, about)]
pub struct Cli {
    /// Configuration file (.toml, .yaml, .yml or .json)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `sweep_criteria=trace`
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Expand criteria such as `maxspeed.1.10.C5` into named variants
    ///
    /// One criterion prints one batch object; several print an array.
    Expand {
        #[arg(required = true, value_name = "CRITERION")]
        criteria: Vec<String>,

        /// Accept `min > max` and sweep downwards
        #[arg(long)]
        allow_descending: bool,
    },

    /// Resolve a scenario such as `LowBlockCount.10x10x2`
    Resolve {
        scenario: String,

        /// Keep any `+suffix` in the output
        #[arg(long)]
        retain_suffix: bool,
    },

    /// Parse an experiment setup such as `T1000.K5.N50`
    ExpSetup { spec: String },

    /// Render every variant of a criterion on top of scenario and setup changes
    Render {
        criterion: String,

        #[arg(long)]
        scenario: Option<String>,

        #[arg(long, value_name = "SPEC")]
        exp_setup: Option<String>,

        #[arg(long)]
        allow_descending: bool,
    },
}

impl Command {
    /// Configuration layer set by this command's flags
    #[must_use]
    pub fn config_layer(&self) -> SweepConfig {
        let mut layer = SweepConfig::new();
        match self {
            Self::Expand {
                allow_descending: true,
                ..
            }
            | Self::Render {
                allow_descending: true,
                ..
            } => layer.range_policy = Some(RangePolicy::AllowDescending),
            Self::Resolve {
                retain_suffix: true,
                ..
            } => layer.suffix_policy = Some(SuffixPolicy::Retain),
            _ => {}
        }
        layer
    }
}

/// JSON form of a resolved scenario
#[derive(Debug, Serialize)]
pub struct ResolveOutput {
    pub generator: String,
    pub tag: String,
    pub dims: Dimensions,
    pub canonical: String,
    pub suffix: Option<String>,
    pub mutations: MutationSet,
}

/// JSON form of one rendered variant
#[derive(Debug, Serialize)]
pub struct RenderedVariant {
    pub name: String,
    pub exp_def: AttrTree,
}

/// Log filter from `--log-level`, else `RUST_LOG`, else `info`
///
/// # Errors
/// Fails if the `--log-level` directive does not parse.
pub fn log_filter(cli: &Cli) -> anyhow::Result<EnvFilter> {
    match &cli.log_level {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid --log-level '{directive}'")),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))),
    }
}

/// Fold defaults, the configuration file and cmdline flags
///
/// # Errors
/// Fails if the configuration file cannot be loaded.
pub fn load_config(cli: &Cli) -> anyhow::Result<ResolvedConfig> {
    let mut config = SweepConfig::new();
    if let Some(path) = &cli.config {
        let file = SweepConfig::from_path(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?;
        config = config.merge(file);
    }
    let resolved = config.merge(cli.command.config_layer()).resolved();
    tracing::debug!(?resolved, "resolved configuration");
    Ok(resolved)
}

/// Execute the parsed command
///
/// # Errors
/// Fails on any configuration, parse or resolution error.
pub fn run(cli: &Cli) -> anyhow::Result<serde_json::Value> {
    let plan = BatchPlan::from_config(load_config(cli)?).context("failed to build batch plan")?;

    let output = match &cli.command {
        Command::Expand { criteria, .. } => {
            let batches = plan
                .expand_all(criteria)
                .into_iter()
                .zip(criteria)
                .map(|(res, arg)| res.with_context(|| format!("failed to expand '{arg}'")))
                .collect::<anyhow::Result<Vec<_>>>()?;
            match batches.as_slice() {
                [batch] => serde_json::to_value(batch)?,
                _ => serde_json::to_value(&batches)?,
            }
        }
        Command::Resolve { scenario, .. } => {
            let build = plan
                .scenario(scenario)
                .with_context(|| format!("failed to resolve scenario '{scenario}'"))?;
            let spec = build.resolution.spec;
            serde_json::to_value(ResolveOutput {
                generator: build.resolution.generator,
                canonical: spec.canonical_name(),
                tag: spec.tag,
                dims: spec.dims,
                suffix: spec.suffix,
                mutations: build.mutations,
            })?
        }
        Command::ExpSetup { spec } => {
            let setup = plan
                .exp_setup(spec)
                .with_context(|| format!("failed to parse experiment setup '{spec}'"))?;
            serde_json::to_value(setup.gen_attr_changelist())?
        }
        Command::Render {
            criterion,
            scenario,
            exp_setup,
            ..
        } => {
            let batch = plan
                .expand(criterion)
                .with_context(|| format!("failed to expand '{criterion}'"))?;

            let mut shared = Vec::new();
            if let Some(raw) = scenario {
                let build = plan
                    .scenario(raw)
                    .with_context(|| format!("failed to resolve scenario '{raw}'"))?;
                shared.push(build.mutations);
            }
            if let Some(raw) = exp_setup {
                let setup = plan
                    .exp_setup(raw)
                    .with_context(|| format!("failed to parse experiment setup '{raw}'"))?;
                shared.push(setup.gen_attr_changelist());
            }

            let shared: Vec<&MutationSet> = shared.iter().collect();
            let variants: Vec<_> = render(&batch, &shared, &AttrTree::new())?
                .into_iter()
                .map(|(name, exp_def)| RenderedVariant { name, exp_def })
                .collect();
            serde_json::to_value(variants)?
        }
    };

    Ok(output)
}
