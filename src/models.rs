//! Core data models for Benford analysis results
//!
//! These models are produced by the pipeline and consumed by the
//! reporters. The core returns structured values only; all text rendering
//! lives in `reporters`.

use crate::digits::DigitCounts;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Qualitative conformity bands.
///
/// Declaration order is best-to-worst, so the derived `Ord` lets callers
/// compare grades directly (`grade >= Grade::Marginal` means "Marginal or
/// worse").
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum Grade {
    #[default]
    Close,
    Acceptable,
    Marginal,
    NonConforming,
}

impl Grade {
    /// Band a 0-100 composite score.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 85.0 => Grade::Close,
            s if s >= 70.0 => Grade::Acceptable,
            s if s >= 55.0 => Grade::Marginal,
            _ => Grade::NonConforming,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grade::Close => write!(f, "Close"),
            Grade::Acceptable => write!(f, "Acceptable"),
            Grade::Marginal => write!(f, "Marginal"),
            Grade::NonConforming => write!(f, "Non-Conforming"),
        }
    }
}

impl std::str::FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "close" => Ok(Grade::Close),
            "acceptable" => Ok(Grade::Acceptable),
            "marginal" => Ok(Grade::Marginal),
            "non-conforming" | "nonconforming" => Ok(Grade::NonConforming),
            _ => Err(format!(
                "unknown grade '{}'. Valid grades: close, acceptable, marginal, non-conforming",
                s
            )),
        }
    }
}

/// Normalized [0, 1] sub-scores feeding the composite scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub mad_score: f64,
    pub max_score: f64,
    pub p_score: f64,
    pub v_score: f64,
}

/// Everything derived from one accumulator against the Benford model.
///
/// Immutable once computed; derived functionally from exactly one
/// [`DigitCounts`] plus the fixed Benford constants. Recompute, never
/// mutate in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitMetrics {
    /// Benford probability per digit, index i for digit i+1.
    pub expected: [f64; 9],
    /// Observed fraction per digit.
    pub observed: [f64; 9],
    /// `expected - observed` per digit.
    pub deviations: [f64; 9],
    pub chi_square: f64,
    pub p_value: f64,
    pub mad: f64,
    /// Largest-magnitude deviation, sign preserved.
    pub max_deviation: f64,
    pub cramers_v: f64,
    pub scores: SubScores,
    /// Headline conformity score, 0-100.
    pub practical_fit: f64,
    /// Diagnostic-only statistical significance score, 0-100. Kept distinct
    /// from `practical_fit` so callers never conflate significance with the
    /// practical magnitude of deviation.
    pub significance: f64,
    pub practical_grade: Grade,
    pub significance_grade: Grade,
    /// Independent Nigrini-style banding on raw MAD, as a cross-check.
    pub mad_grade: Grade,
}

/// Where a dataset's observations came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Text,
    Image,
    Aggregate,
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetKind::Text => write!(f, "text"),
            DatasetKind::Image => write!(f, "image"),
            DatasetKind::Aggregate => write!(f, "aggregate"),
        }
    }
}

/// Outcome of analyzing one dataset.
///
/// A failed dataset carries its reason in place of metrics; the failure
/// never aborts sibling datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DatasetOutcome {
    Scored {
        counts: DigitCounts,
        /// Tokens or pixels that carried no significant digit.
        skipped: u64,
        metrics: FitMetrics,
    },
    Failed {
        reason: String,
    },
}

impl DatasetOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, DatasetOutcome::Failed { .. })
    }

    pub fn metrics(&self) -> Option<&FitMetrics> {
        match self {
            DatasetOutcome::Scored { metrics, .. } => Some(metrics),
            DatasetOutcome::Failed { .. } => None,
        }
    }
}

/// Report section for one dataset or aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetReport {
    pub name: String,
    pub kind: DatasetKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    pub outcome: DatasetOutcome,
}

/// Grade tallies and failure counts over a whole run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub datasets: usize,
    pub scored: usize,
    pub failed: usize,
    pub close: usize,
    pub acceptable: usize,
    pub marginal: usize,
    pub non_conforming: usize,
}

impl ReportSummary {
    pub fn from_reports(reports: &[DatasetReport]) -> Self {
        let mut summary = Self::default();
        for report in reports {
            summary.datasets += 1;
            match &report.outcome {
                DatasetOutcome::Scored { metrics, .. } => {
                    summary.scored += 1;
                    match metrics.practical_grade {
                        Grade::Close => summary.close += 1,
                        Grade::Acceptable => summary.acceptable += 1,
                        Grade::Marginal => summary.marginal += 1,
                        Grade::NonConforming => summary.non_conforming += 1,
                    }
                }
                DatasetOutcome::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }
}

/// Full result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub datasets: Vec<DatasetReport>,
    pub summary: ReportSummary,
}

impl AnalysisReport {
    pub fn new(datasets: Vec<DatasetReport>) -> Self {
        let summary = ReportSummary::from_reports(&datasets);
        Self { datasets, summary }
    }

    /// True when any dataset failed to compute.
    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }

    /// True when any scored dataset's practical-fit grade is at or below
    /// (worse than or equal to) the given band.
    pub fn any_grade_at_or_below(&self, threshold: Grade) -> bool {
        self.datasets
            .iter()
            .filter_map(|d| d.outcome.metrics())
            .any(|m| m.practical_grade >= threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_bands_from_score() {
        assert_eq!(Grade::from_score(100.0), Grade::Close);
        assert_eq!(Grade::from_score(85.0), Grade::Close);
        assert_eq!(Grade::from_score(84.99), Grade::Acceptable);
        assert_eq!(Grade::from_score(70.0), Grade::Acceptable);
        assert_eq!(Grade::from_score(55.0), Grade::Marginal);
        assert_eq!(Grade::from_score(54.99), Grade::NonConforming);
        assert_eq!(Grade::from_score(0.0), Grade::NonConforming);
    }

    #[test]
    fn grade_ordering_is_best_to_worst() {
        assert!(Grade::Close < Grade::Acceptable);
        assert!(Grade::Marginal < Grade::NonConforming);
        assert!(Grade::NonConforming >= Grade::Marginal);
    }

    #[test]
    fn grade_parses_cli_spellings() {
        assert_eq!("close".parse::<Grade>().unwrap(), Grade::Close);
        assert_eq!(
            "non-conforming".parse::<Grade>().unwrap(),
            Grade::NonConforming
        );
        assert!("excellent".parse::<Grade>().is_err());
    }

    #[test]
    fn grade_display_labels() {
        assert_eq!(Grade::Close.to_string(), "Close");
        assert_eq!(Grade::NonConforming.to_string(), "Non-Conforming");
    }

    #[test]
    fn summary_tallies_grades_and_failures() {
        let scored = |grade: Grade| DatasetReport {
            name: "d".into(),
            kind: DatasetKind::Text,
            source: None,
            outcome: DatasetOutcome::Scored {
                counts: DigitCounts::new(),
                skipped: 0,
                metrics: FitMetrics {
                    expected: [0.0; 9],
                    observed: [0.0; 9],
                    deviations: [0.0; 9],
                    chi_square: 0.0,
                    p_value: 1.0,
                    mad: 0.0,
                    max_deviation: 0.0,
                    cramers_v: 0.0,
                    scores: SubScores {
                        mad_score: 1.0,
                        max_score: 1.0,
                        p_score: 1.0,
                        v_score: 1.0,
                    },
                    practical_fit: 100.0,
                    significance: 100.0,
                    practical_grade: grade,
                    significance_grade: grade,
                    mad_grade: grade,
                },
            },
        };
        let failed = DatasetReport {
            name: "bad".into(),
            kind: DatasetKind::Text,
            source: None,
            outcome: DatasetOutcome::Failed {
                reason: "dataset contains no digit observations".into(),
            },
        };

        let report = AnalysisReport::new(vec![
            scored(Grade::Close),
            scored(Grade::NonConforming),
            failed,
        ]);
        assert_eq!(report.summary.datasets, 3);
        assert_eq!(report.summary.scored, 2);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.close, 1);
        assert_eq!(report.summary.non_conforming, 1);
        assert!(report.has_failures());
        assert!(report.any_grade_at_or_below(Grade::NonConforming));
        assert!(report.any_grade_at_or_below(Grade::Marginal));

        let clean = AnalysisReport::new(vec![scored(Grade::Close)]);
        assert!(!clean.has_failures());
        assert!(!clean.any_grade_at_or_below(Grade::Marginal));
    }

    #[test]
    fn outcome_serde_round_trips() {
        let outcome = DatasetOutcome::Failed {
            reason: "boom".into(),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"status\":\"failed\""));
        let back: DatasetOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
    }
}
