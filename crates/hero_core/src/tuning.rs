//! Engine tuning: adjustment constants, probability mode, exclusions.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How the guessed participant's win probability is computed from the
/// reference roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbabilityMode {
    /// Unrounded guessed weight over the sum of rounded weights.
    /// Matches the long-observed behavior of the tool.
    #[default]
    Mixed,
    /// Rounded guessed weight over the sum of rounded weights; exactly the
    /// odds the wheel itself uses.
    Rounded,
    /// Unrounded guessed weight over the sum of unrounded weights.
    Unrounded,
}

/// Immutable knobs for the adjustment engine.
///
/// Constructed once (defaults, or `io/tuning.toml`) and passed into every
/// engine call; there is no module-level mutable configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    /// Base reduction when becoming superhero.
    pub superhero_reduction: f64,
    /// Base increase when not becoming superhero (and no guess was made).
    pub non_superhero_increase: f64,
    /// Correct guesses earn `rate / guessed_probability`, so long shots pay
    /// out more than favorites.
    pub correct_guess_bonus_rate: f64,
    /// Flat penalty for any wrong guess; set above the base increase.
    pub wrong_guess_base_penalty: f64,
    /// Extra wrong-guess penalty proportional to how likely the guess was.
    pub wrong_guess_penalty_scaling: f64,
    /// Floor so nobody's odds ever reach zero.
    pub min_weight: f64,
    /// Ceiling against runaway weights.
    pub max_weight: f64,
    pub probability_mode: ProbabilityMode,
    /// Members on leave: kept in the roster, skipped by the lottery.
    pub excluded: Vec<String>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            superhero_reduction: 1.0,
            non_superhero_increase: 1.0,
            correct_guess_bonus_rate: 0.3,
            wrong_guess_base_penalty: 1.2,
            wrong_guess_penalty_scaling: 3.0,
            min_weight: 0.5,
            max_weight: 15.0,
            probability_mode: ProbabilityMode::Mixed,
            excluded: Vec::new(),
        }
    }
}

impl Tuning {
    /// Load tuning from a TOML file; a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(toml::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Exclusion matching is case-insensitive, roster identity is not.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded
            .iter()
            .any(|excluded| excluded.to_lowercase() == name.to_lowercase())
    }
}
