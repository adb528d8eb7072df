//! Fit scorer: sub-score mappings, composites, and grade bands

use crate::config::{AnalysisConfig, MadBands, ScoreWeights};
use crate::digits::DigitCounts;
use crate::models::{FitMetrics, Grade, SubScores};
use crate::stats::{self, StatsError, DIGIT_CATEGORIES};
use tracing::debug;

/// |max deviation| at which the max-deviation sub-score bottoms out.
const MAX_DEVIATION_SPAN: f64 = 0.10;

/// p-value at which the significance sub-score reaches full credit.
const P_VALUE_SPAN: f64 = 0.10;

/// Cramér's V at which the effect-size sub-score bottoms out.
const CRAMERS_V_SPAN: f64 = 0.10;

/// Floor applied inside the geometric mean to keep `ln` finite.
const GEO_MEAN_FLOOR: f64 = 1e-12;

pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Fraction of the way `x` lies between `a` and `b`, clamped to [0, 1].
///
/// Degenerate span (`a == b`) returns 1 when `x >= b`, else 0.
pub fn inv_lerp(a: f64, b: f64, x: f64) -> f64 {
    if a == b {
        if x >= b {
            1.0
        } else {
            0.0
        }
    } else {
        clamp01((x - a) / (b - a))
    }
}

/// Cramér's V effect size: `sqrt(chi2 / (n · (k - 1)))`.
///
/// Undefined for an empty sample.
pub fn cramers_v(chi2: f64, n: u64, categories: usize) -> Result<f64, StatsError> {
    if n == 0 {
        return Err(StatsError::DegenerateInput);
    }
    Ok((chi2 / (n as f64 * (categories as f64 - 1.0))).sqrt())
}

/// Weighted geometric mean of `(value, weight)` pairs.
///
/// Values are clamped to [0, 1] and floored at 1e-12 before `ln`, so a
/// zero sub-score heavily penalizes the mean without producing -inf.
pub fn weighted_geo_mean(pairs: &[(f64, f64)]) -> f64 {
    let weight_sum: f64 = pairs.iter().map(|(_, w)| w).sum();
    if weight_sum <= 0.0 {
        return 0.0;
    }
    let log_sum: f64 = pairs
        .iter()
        .map(|(v, w)| w * clamp01(*v).max(GEO_MEAN_FLOOR).ln())
        .sum();
    (log_sum / weight_sum).exp()
}

/// Scores one accumulator against the Benford model.
///
/// Holds the configured sub-score weights and MAD band thresholds; the
/// statistics themselves are pure functions in [`crate::stats`].
pub struct FitScorer {
    weights: ScoreWeights,
    bands: MadBands,
}

impl Default for FitScorer {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

impl FitScorer {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            weights: config.scoring.weights,
            bands: config.bands,
        }
    }

    /// MAD sub-score: 1.0 inside the Close band, two linear decays across
    /// the Acceptable and Marginal bands, 0.0 beyond.
    pub fn mad_score(&self, mad: f64) -> f64 {
        let b = &self.bands;
        if mad <= b.close {
            1.0
        } else if mad <= b.acceptable {
            1.0 - inv_lerp(b.close, b.acceptable, mad) * 0.35
        } else if mad <= b.marginal {
            0.65 - inv_lerp(b.acceptable, b.marginal, mad) * 0.65
        } else {
            0.0
        }
    }

    pub fn max_score(&self, max_deviation: f64) -> f64 {
        1.0 - clamp01(max_deviation.abs() / MAX_DEVIATION_SPAN)
    }

    pub fn p_score(&self, p_value: f64) -> f64 {
        clamp01(p_value / P_VALUE_SPAN)
    }

    pub fn v_score(&self, cramers_v: f64) -> f64 {
        1.0 - clamp01(cramers_v / CRAMERS_V_SPAN)
    }

    /// Band raw MAD directly, independent of the score/weight system.
    pub fn grade_by_mad(&self, mad: f64) -> Grade {
        let b = &self.bands;
        if mad <= b.close {
            Grade::Close
        } else if mad <= b.acceptable {
            Grade::Acceptable
        } else if mad <= b.marginal {
            Grade::Marginal
        } else {
            Grade::NonConforming
        }
    }

    /// Derive the full [`FitMetrics`] for one accumulator.
    ///
    /// Fails with [`StatsError::DegenerateInput`] on an empty accumulator
    /// and [`StatsError::NonConvergence`] if the p-value series stalls;
    /// both belong to the caller's per-dataset error handling.
    pub fn score(&self, counts: &DigitCounts) -> Result<FitMetrics, StatsError> {
        if counts.is_empty() {
            return Err(StatsError::DegenerateInput);
        }

        let expected = stats::expected_probabilities();
        let observed = stats::observed_fractions(counts)?;
        let deviations = stats::deviations(counts)?;
        let chi_square = stats::chi_square(counts);
        let p_value = stats::p_value(chi_square)?;
        let cramers_v = cramers_v(chi_square, counts.total(), DIGIT_CATEGORIES)?;

        let scores = SubScores {
            mad_score: self.mad_score(deviations.mad),
            max_score: self.max_score(deviations.max_deviation),
            p_score: self.p_score(p_value),
            v_score: self.v_score(cramers_v),
        };

        let w = &self.weights;
        let practical_fit = 100.0
            * weighted_geo_mean(&[
                (scores.mad_score, w.mad),
                (scores.v_score, w.v),
                (scores.max_score, w.max),
            ]);
        let significance = 100.0 * weighted_geo_mean(&[(scores.p_score, 1.0)]);

        debug!(
            "scores: mad={:.3} max={:.3} p={:.3} v={:.3} -> practical={:.1} significance={:.1}",
            scores.mad_score,
            scores.max_score,
            scores.p_score,
            scores.v_score,
            practical_fit,
            significance
        );

        Ok(FitMetrics {
            expected,
            observed,
            deviations: deviations.per_digit,
            chi_square,
            p_value,
            mad: deviations.mad,
            max_deviation: deviations.max_deviation,
            cramers_v,
            scores,
            practical_fit,
            significance,
            practical_grade: Grade::from_score(practical_fit),
            significance_grade: Grade::from_score(significance),
            mad_grade: self.grade_by_mad(deviations.mad),
        })
    }
}
