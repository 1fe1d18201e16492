//! Experiment setup parsing
//!
//! Grammar: `T<secs>[.K<ticks>][.N<datapoints>]`. The duration is required;
//! the tick rate and datapoint count fall back to configured defaults.

use crate::error::ExpSetupError;
use serde::{Deserialize, Serialize};
use std::fmt;
use sweep_expdef::{AttrMutation, MutationSet};

/// Element holding the experiment timing attributes
pub const EXP_SETUP_PATH: &str = "$.exp_setup";

/// Default experiment length in seconds
pub const DEFAULT_SECS_PER_RUN: u64 = 300;

/// Default controller ticks per second
pub const DEFAULT_TICKS_PER_SEC: u64 = 5;

/// Default number of collected datapoints
pub const DEFAULT_N_DATAPOINTS: u64 = 50;

/// Timing parameters shared by every run in a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpSetup {
    /// Simulated seconds per run
    pub n_secs_per_run: u64,
    /// Controller ticks per simulated second
    pub n_ticks_per_sec: u64,
    /// Datapoints collected per run
    pub n_datapoints: u64,
}

impl Default for ExpSetup {
    fn default() -> Self {
        Self {
            n_secs_per_run: DEFAULT_SECS_PER_RUN,
            n_ticks_per_sec: DEFAULT_TICKS_PER_SEC,
            n_datapoints: DEFAULT_N_DATAPOINTS,
        }
    }
}

impl fmt::Display for ExpSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "T{}.K{}.N{}",
            self.n_secs_per_run, self.n_ticks_per_sec, self.n_datapoints
        )
    }
}

impl ExpSetup {
    /// Parse with the built-in defaults
    ///
    /// # Errors
    /// See [`ExpSetup::parse_with_defaults`].
    pub fn parse(raw: &str) -> Result<Self, ExpSetupError> {
        Self::parse_with_defaults(raw, Self::default())
    }

    /// Parse, filling omitted sections from `defaults`
    ///
    /// # Errors
    /// - [`ExpSetupError::MissingDuration`] if the first section is not `T...`
    /// - [`ExpSetupError::UnknownSection`] for anything other than `K`/`N`
    /// - [`ExpSetupError::DuplicateSection`] if `K` or `N` repeats
    /// - [`ExpSetupError::InvalidNumericToken`] if a section has no digits
    /// - [`ExpSetupError::ZeroValue`] for a zero duration or tick rate
    pub fn parse_with_defaults(raw: &str, defaults: Self) -> Result<Self, ExpSetupError> {
        let mut sections = raw.split('.');

        let duration = sections
            .next()
            .filter(|s| s.starts_with('T'))
            .ok_or_else(|| ExpSetupError::MissingDuration {
                raw: raw.to_string(),
            })?;

        let mut setup = Self {
            n_secs_per_run: section_value(raw, duration)?,
            ..defaults
        };
        let mut seen_ticks = false;
        let mut seen_datapoints = false;

        for section in sections {
            let seen = match section.chars().next() {
                Some('K') => &mut seen_ticks,
                Some('N') => &mut seen_datapoints,
                _ => {
                    return Err(ExpSetupError::UnknownSection {
                        raw: raw.to_string(),
                        section: section.to_string(),
                    })
                }
            };
            if std::mem::replace(seen, true) {
                return Err(ExpSetupError::DuplicateSection {
                    raw: raw.to_string(),
                    section: section.to_string(),
                });
            }

            let value = section_value(raw, section)?;
            if section.starts_with('K') {
                setup.n_ticks_per_sec = value;
            } else {
                setup.n_datapoints = value;
            }
        }

        for (section, value) in [("T", setup.n_secs_per_run), ("K", setup.n_ticks_per_sec)] {
            if value == 0 {
                return Err(ExpSetupError::ZeroValue {
                    raw: raw.to_string(),
                    section: section.to_string(),
                });
            }
        }

        tracing::debug!(%setup, raw, "parsed experiment setup");
        Ok(setup)
    }

    /// Total controller ticks per run
    #[inline]
    #[must_use]
    pub fn n_ticks(&self) -> u64 {
        self.n_secs_per_run.saturating_mul(self.n_ticks_per_sec)
    }

    /// Mutations writing this setup into an experiment definition
    #[must_use]
    pub fn gen_attr_changelist(&self) -> MutationSet {
        MutationSet::with_capacity(3)
            .with(AttrMutation::new(
                EXP_SETUP_PATH,
                "length",
                self.n_secs_per_run.to_string(),
            ))
            .with(AttrMutation::new(
                EXP_SETUP_PATH,
                "n_datapoints",
                self.n_datapoints.to_string(),
            ))
            .with(AttrMutation::new(
                EXP_SETUP_PATH,
                "ticks_per_sec",
                self.n_ticks_per_sec.to_string(),
            ))
    }
}

/// Digits after the one-letter prefix of a section
fn section_value(raw: &str, section: &str) -> Result<u64, ExpSetupError> {
    let digits = section.get(1..).unwrap_or_default();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ExpSetupError::InvalidNumericToken {
            raw: raw.to_string(),
            section: section.to_string(),
        });
    }
    digits
        .parse()
        .map_err(|_| ExpSetupError::InvalidNumericToken {
            raw: raw.to_string(),
            section: section.to_string(),
        })
}

/// Partial setup as it appears in configuration files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExpSetupOverrides {
    pub n_secs_per_run: Option<u64>,
    pub n_ticks_per_sec: Option<u64>,
    pub n_datapoints: Option<u64>,
}

impl ExpSetupOverrides {
    /// Field-wise merge; values set in `later` win
    #[must_use]
    pub fn merge(self, later: Self) -> Self {
        Self {
            n_secs_per_run: later.n_secs_per_run.or(self.n_secs_per_run),
            n_ticks_per_sec: later.n_ticks_per_sec.or(self.n_ticks_per_sec),
            n_datapoints: later.n_datapoints.or(self.n_datapoints),
        }
    }

    /// Apply on top of a concrete setup
    #[must_use]
    pub fn apply_to(self, base: ExpSetup) -> ExpSetup {
        ExpSetup {
            n_secs_per_run: self.n_secs_per_run.unwrap_or(base.n_secs_per_run),
            n_ticks_per_sec: self.n_ticks_per_sec.unwrap_or(base.n_ticks_per_sec),
            n_datapoints: self.n_datapoints.unwrap_or(base.n_datapoints),
        }
    }
}
