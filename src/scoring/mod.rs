//! Composite Fit Scoring System
//!
//! This module turns the raw statistics of a dataset (MAD, max deviation,
//! p-value, Cramér's V) into normalized sub-scores and combines them into
//! two headline numbers with discrete grade bands.
//!
//! # Scoring Formula
//!
//! ```text
//! practical_fit = 100 · geo_mean[(mad_score, 0.45), (v_score, 0.35), (max_score, 0.20)]
//! significance  = 100 · geo_mean[(p_score, 1.0)]
//!
//! geo_mean = exp( Σ wᵢ·ln(max(clamp01(vᵢ), 1e-12)) / Σ wᵢ )
//! ```
//!
//! The geometric mean (rather than a weighted sum) means one collapsed
//! sub-score drags the composite toward zero instead of being averaged
//! away; the 1e-12 floor keeps `ln` finite.
//!
//! # Grades
//!
//! Both composites band independently: ≥85 Close, ≥70 Acceptable,
//! ≥55 Marginal, else Non-Conforming. A third classification bands the raw
//! MAD directly (Nigrini-style thresholds 0.006/0.012/0.015) as a
//! cross-check that bypasses the score/weight system entirely.

mod fit_scorer;

pub use fit_scorer::{clamp01, cramers_v, inv_lerp, weighted_geo_mean, FitScorer};
