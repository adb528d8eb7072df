//! Project-level configuration support
//!
//! Loads per-project configuration from a `benford.toml` file in the
//! working directory. Every setting has a default; a missing or malformed
//! file never aborts an analysis.
//!
//! # Configuration Format
//!
//! ```toml
//! # benford.toml
//!
//! [scoring]
//! # Relative weights of the practical-fit sub-scores.
//! weights = { mad = 0.45, v = 0.35, max = 0.20 }
//!
//! [bands]
//! # MAD thresholds for the Close / Acceptable / Marginal bands.
//! close = 0.006
//! acceptable = 0.012
//! marginal = 0.015
//! ```

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Config file name looked up in the working directory.
pub const CONFIG_FILE: &str = "benford.toml";

/// Template written by `benford init`.
pub const CONFIG_TEMPLATE: &str = r#"# benford.toml - configuration for the benford analyzer
#
# All settings are optional; the values below are the defaults.

[scoring]
# Relative weights of the practical-fit sub-scores (normalized on load).
#   mad - mean absolute deviation band score
#   v   - Cramér's V effect-size score
#   max - largest single-digit deviation score
weights = { mad = 0.45, v = 0.35, max = 0.20 }

[bands]
# MAD thresholds for the conformity bands. Values above `marginal`
# grade as Non-Conforming.
close = 0.006
acceptable = 0.012
marginal = 0.015
"#;

/// Top-level analysis configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub scoring: ScoringConfig,
    pub bands: MadBands,
}

/// Scoring configuration for the composite practical-fit score.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
}

/// Relative weights of the practical-fit sub-scores.
///
/// The composite uses a weighted geometric mean, which normalizes by the
/// weight sum, so only the ratios matter. Weights must be finite and
/// positive.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub mad: f64,
    pub v: f64,
    pub max: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            mad: 0.45,
            v: 0.35,
            max: 0.20,
        }
    }
}

impl ScoreWeights {
    pub fn is_valid(&self) -> bool {
        [self.mad, self.v, self.max]
            .iter()
            .all(|w| w.is_finite() && *w > 0.0)
    }

    /// Scale the weights to sum to 1.0.
    pub fn normalize(&mut self) {
        let sum = self.mad + self.v + self.max;
        if sum > 0.0 {
            self.mad /= sum;
            self.v /= sum;
            self.max /= sum;
        }
    }
}

/// MAD thresholds for the Nigrini-style conformity bands.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MadBands {
    pub close: f64,
    pub acceptable: f64,
    pub marginal: f64,
}

impl Default for MadBands {
    fn default() -> Self {
        Self {
            close: 0.006,
            acceptable: 0.012,
            marginal: 0.015,
        }
    }
}

impl MadBands {
    pub fn is_valid(&self) -> bool {
        self.close > 0.0 && self.close < self.acceptable && self.acceptable < self.marginal
    }
}

impl AnalysisConfig {
    /// Load configuration from `<dir>/benford.toml`.
    ///
    /// A missing file yields the defaults silently; a malformed file or
    /// invalid section is logged and replaced by its default so the
    /// analysis still runs.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        let Ok(raw) = std::fs::read_to_string(&path) else {
            debug!("no {} found, using defaults", CONFIG_FILE);
            return Self::default();
        };

        let mut config: AnalysisConfig = match toml::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("failed to parse {}: {e}; using defaults", path.display());
                return Self::default();
            }
        };
        config.sanitize();
        debug!("loaded configuration from {}", path.display());
        config
    }

    /// Replace invalid sections with defaults and normalize the weights.
    pub fn sanitize(&mut self) {
        if !self.scoring.weights.is_valid() {
            warn!("scoring weights must be finite and positive; using defaults");
            self.scoring.weights = ScoreWeights::default();
        }
        self.scoring.weights.normalize();
        if !self.bands.is_valid() {
            warn!("MAD bands must be positive and strictly increasing; using defaults");
            self.bands = MadBands::default();
        }
    }
}
