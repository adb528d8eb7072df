//! Analyze command: discovery → pipeline → rendered report

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::config::AnalysisConfig;
use crate::ingest;
use crate::models::Grade;
use crate::pipeline::Pipeline;
use crate::reporters::{self, OutputFormat};

/// Arguments for one analyze invocation.
#[derive(Debug, Default)]
pub struct AnalyzeArgs {
    pub paths: Vec<PathBuf>,
    pub format: String,
    pub output: Option<PathBuf>,
    pub aggregate: bool,
    pub fail_on: Option<Grade>,
    pub no_color: bool,
}

/// Run an analysis and print/persist the report.
///
/// Returns the process exit code: 2 when any dataset failed to compute,
/// 1 when the `--fail-on` gate trips, 0 otherwise.
pub fn run(args: AnalyzeArgs) -> Result<i32> {
    let format = if args.format.is_empty() {
        OutputFormat::Text
    } else {
        args.format.parse::<OutputFormat>()?
    };

    let config = AnalysisConfig::load(Path::new("."));
    let groups = ingest::discover(&args.paths)?;

    let total_sources: u64 = groups.iter().map(|g| g.sources.len() as u64).sum();
    let progress = ProgressBar::new(total_sources).with_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let report = Pipeline::new(&config)
        .with_run_aggregate(args.aggregate)
        .run_with_progress(&groups, Some(&progress));
    progress.finish_and_clear();

    let color = !args.no_color && format == OutputFormat::Text;
    let rendered = reporters::report(&report, format, color)?;
    println!("{rendered}");

    if let Some(path) = &args.output {
        // Files always get the plain rendering, never ANSI escapes.
        let plain = reporters::report(&report, format, false)?;
        std::fs::write(path, plain)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("report written to {}", path.display());
    }

    if report.has_failures() {
        return Ok(2);
    }
    if let Some(threshold) = args.fail_on {
        if report.any_grade_at_or_below(threshold) {
            return Ok(1);
        }
    }
    Ok(0)
}
