//! Statistical core: Benford expectations, goodness of fit, deviations
//!
//! Everything here is a deterministic pure function of a [`DigitCounts`]
//! accumulator. No randomness, no I/O; identical inputs always produce
//! identical outputs.

pub mod gamma;

use crate::digits::DigitCounts;
use thiserror::Error;

/// Number of leading-digit categories (1 through 9).
pub const DIGIT_CATEGORIES: usize = 9;

/// Degrees of freedom of the goodness-of-fit test (categories - 1).
pub const DEGREES_OF_FREEDOM: f64 = 8.0;

/// Failures the statistical core can surface for a dataset.
///
/// Both are detected and reported at the dataset boundary; neither aborts
/// sibling datasets, and neither is retried (the computation is
/// deterministic, so retrying cannot change the outcome).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// The accumulator holds no observations; observed fractions,
    /// Cramér's V, and MAD banding are all undefined.
    #[error("dataset contains no digit observations")]
    DegenerateInput,

    /// The incomplete-gamma series hit its iteration cap.
    #[error("incomplete gamma series did not converge after {iterations} iterations (s={s}, x={x})")]
    NonConvergence { s: f64, x: f64, iterations: usize },
}

/// Theoretical Benford probability for a leading digit.
///
/// `log10(1 + 1/d)` for `d` in `1..=9`; 0.0 for anything else (defined,
/// never an error).
pub fn expected_probability(digit: u8) -> f64 {
    if (1..=9).contains(&digit) {
        (1.0 + 1.0 / f64::from(digit)).log10()
    } else {
        0.0
    }
}

/// All nine Benford probabilities, computed once per analysis and reused.
pub fn expected_probabilities() -> [f64; DIGIT_CATEGORIES] {
    std::array::from_fn(|i| expected_probability(i as u8 + 1))
}

/// Observed fraction of each digit. Undefined for an empty accumulator.
pub fn observed_fractions(counts: &DigitCounts) -> Result<[f64; DIGIT_CATEGORIES], StatsError> {
    if counts.is_empty() {
        return Err(StatsError::DegenerateInput);
    }
    let total = counts.total() as f64;
    Ok(std::array::from_fn(|i| counts.counts()[i] as f64 / total))
}

/// Chi-square goodness-of-fit statistic against the Benford expectation.
///
/// Each digit contributes `(observed - expected)^2 / expected` with
/// `expected = P(d) * total`. Cells with zero expected count (only possible
/// when the total is zero) contribute nothing, so an empty accumulator
/// yields 0.
pub fn chi_square(counts: &DigitCounts) -> f64 {
    let total = counts.total() as f64;
    let mut chi2 = 0.0;
    for d in 1..=9u8 {
        let expected = expected_probability(d) * total;
        if expected > 0.0 {
            let diff = counts.count(d) as f64 - expected;
            chi2 += diff * diff / expected;
        }
    }
    chi2
}

/// Upper-tail probability of the chi-square statistic at df = 8.
///
/// `p = 1 - P(df/2, chi2/2)` where `P` is the regularized lower incomplete
/// gamma function. Clamped to [0, 1].
pub fn p_value(chi2: f64) -> Result<f64, StatsError> {
    let lower = gamma::regularized_lower_gamma(DEGREES_OF_FREEDOM / 2.0, chi2 / 2.0)?;
    Ok((1.0 - lower).clamp(0.0, 1.0))
}

/// Per-digit deviation profile of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Deviations {
    /// `expected - observed` fraction per digit, index i for digit i+1.
    pub per_digit: [f64; DIGIT_CATEGORIES],
    /// Mean absolute deviation over the nine digits.
    pub mad: f64,
    /// The deviation of largest magnitude, sign preserved. Ties keep the
    /// first in ascending digit order.
    pub max_deviation: f64,
}

/// Compute deviations, MAD, and the signed max deviation.
pub fn deviations(counts: &DigitCounts) -> Result<Deviations, StatsError> {
    let observed = observed_fractions(counts)?;
    let mut per_digit = [0.0; DIGIT_CATEGORIES];
    let mut abs_sum = 0.0;
    let mut max_deviation = 0.0f64;
    for (i, obs) in observed.iter().enumerate() {
        let dev = expected_probability(i as u8 + 1) - obs;
        per_digit[i] = dev;
        abs_sum += dev.abs();
        if dev.abs() > max_deviation.abs() {
            max_deviation = dev;
        }
    }
    Ok(Deviations {
        per_digit,
        mad: abs_sum / DIGIT_CATEGORIES as f64,
        max_deviation,
    })
}
