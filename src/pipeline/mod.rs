//! Analysis pipeline
//!
//! Orchestrates the full run:
//! 1. Ingest each discovered source into its own accumulator
//! 2. Derive and score fit metrics per dataset
//! 3. Aggregate directory groups (union of member observations, scored
//!    with the exact same accumulate → derive path)
//! 4. Optionally aggregate the whole run
//!
//! One dataset's failure (unreadable file, undecodable image, degenerate
//! input, non-convergent series) is contained in its own report section;
//! sibling datasets always complete. Nothing is retried: the computation
//! is deterministic, so retrying cannot change the outcome.

use std::path::PathBuf;

use indicatif::ProgressBar;
use tracing::{info, warn};

use crate::config::AnalysisConfig;
use crate::digits::DigitCounts;
use crate::ingest::{self, DatasetGroup, DatasetSource, SourceKind};
use crate::models::{AnalysisReport, DatasetKind, DatasetOutcome, DatasetReport};
use crate::scoring::FitScorer;

/// Name of the optional run-wide union dataset.
const RUN_AGGREGATE_NAME: &str = "all inputs";

/// Full analysis pipeline.
pub struct Pipeline {
    scorer: FitScorer,
    /// Whether to score a union of every ingested source at the end.
    run_aggregate: bool,
}

impl Pipeline {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            scorer: FitScorer::new(config),
            run_aggregate: false,
        }
    }

    /// Enable the run-wide union dataset.
    pub fn with_run_aggregate(mut self, enabled: bool) -> Self {
        self.run_aggregate = enabled;
        self
    }

    /// Analyze all groups, in order.
    pub fn run(&self, groups: &[DatasetGroup]) -> AnalysisReport {
        self.run_with_progress(groups, None)
    }

    /// Analyze all groups, ticking `progress` once per ingested source.
    pub fn run_with_progress(
        &self,
        groups: &[DatasetGroup],
        progress: Option<&ProgressBar>,
    ) -> AnalysisReport {
        let mut datasets = Vec::new();
        let mut run_counts = DigitCounts::new();
        let mut run_skipped = 0u64;
        let mut run_members = 0usize;

        for group in groups {
            let mut group_counts = DigitCounts::new();
            let mut group_skipped = 0u64;
            let mut group_members = 0usize;

            for source in &group.sources {
                if let Some(bar) = progress {
                    bar.set_message(source_name(source));
                }
                let report = self.analyze_source(source);
                if let DatasetOutcome::Scored {
                    counts, skipped, ..
                } = &report.outcome
                {
                    group_counts.merge(counts);
                    group_skipped += skipped;
                    group_members += 1;
                }
                datasets.push(report);
                if let Some(bar) = progress {
                    bar.inc(1);
                }
            }

            run_counts.merge(&group_counts);
            run_skipped += group_skipped;
            run_members += group_members;

            // A union over the group's successfully ingested members; a
            // single-source group would just repeat its one dataset.
            if group.aggregate && group.sources.len() > 1 && group_members > 0 {
                datasets.push(self.score_counts(
                    format!("{} (aggregate)", group.name),
                    DatasetKind::Aggregate,
                    None,
                    group_counts,
                    group_skipped,
                ));
            }
        }

        if self.run_aggregate && run_members > 0 {
            datasets.push(self.score_counts(
                RUN_AGGREGATE_NAME.to_string(),
                DatasetKind::Aggregate,
                None,
                run_counts,
                run_skipped,
            ));
        }

        let report = AnalysisReport::new(datasets);
        info!(
            "analyzed {} datasets: {} scored, {} failed",
            report.summary.datasets, report.summary.scored, report.summary.failed
        );
        report
    }

    fn analyze_source(&self, source: &DatasetSource) -> DatasetReport {
        let kind = match source.kind {
            SourceKind::Text => DatasetKind::Text,
            SourceKind::Image => DatasetKind::Image,
        };
        match ingest::ingest(source) {
            Ok((counts, skipped)) => self.score_counts(
                source_name(source),
                kind,
                Some(source.path.clone()),
                counts,
                skipped,
            ),
            Err(e) => {
                warn!("{}: {e:#}", source.path.display());
                DatasetReport {
                    name: source_name(source),
                    kind,
                    source: Some(source.path.clone()),
                    outcome: DatasetOutcome::Failed {
                        reason: format!("{e:#}"),
                    },
                }
            }
        }
    }

    fn score_counts(
        &self,
        name: String,
        kind: DatasetKind,
        source: Option<PathBuf>,
        counts: DigitCounts,
        skipped: u64,
    ) -> DatasetReport {
        let outcome = match self.scorer.score(&counts) {
            Ok(metrics) => DatasetOutcome::Scored {
                counts,
                skipped,
                metrics,
            },
            Err(e) => {
                warn!("{name}: {e}");
                DatasetOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };
        DatasetReport {
            name,
            kind,
            source,
            outcome,
        }
    }
}

fn source_name(source: &DatasetSource) -> String {
    source
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.path.display().to_string())
}
