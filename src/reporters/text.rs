//! Text (terminal) reporter with colors and formatting

use crate::models::{AnalysisReport, DatasetOutcome, DatasetReport, Grade};
use anyhow::Result;

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Grade colors (ANSI escape codes)
fn grade_color(grade: Grade) -> &'static str {
    match grade {
        Grade::Close => "\x1b[32m",         // Green
        Grade::Acceptable => "\x1b[92m",    // Light green
        Grade::Marginal => "\x1b[33m",      // Yellow
        Grade::NonConforming => "\x1b[31m", // Red
    }
}

/// Render report as formatted terminal output
pub fn render(report: &AnalysisReport, color: bool) -> Result<String> {
    let mut out = String::new();

    let paint = |code: &'static str| if color { code } else { "" };
    let reset = paint(RESET);
    let bold = paint(BOLD);
    let dim = paint(DIM);

    // Header
    out.push_str(&format!("\n{bold}Benford Analysis{reset}\n"));
    out.push_str(&format!(
        "{dim}──────────────────────────────────────{reset}\n"
    ));
    let s = &report.summary;
    out.push_str(&format!(
        "Datasets: {}  Scored: {}  Failed: {}\n\n",
        s.datasets, s.scored, s.failed
    ));

    for dataset in &report.datasets {
        out.push_str(&render_dataset(dataset, color));
        out.push('\n');
    }

    // Grade tally
    out.push_str(&format!("{bold}GRADES{reset}  "));
    out.push_str(&format!(
        "Close: {}  Acceptable: {}  Marginal: {}  Non-Conforming: {}\n",
        s.close, s.acceptable, s.marginal, s.non_conforming
    ));

    Ok(out)
}

fn render_dataset(dataset: &DatasetReport, color: bool) -> String {
    let mut out = String::new();
    let paint = |code: &'static str| if color { code } else { "" };
    let reset = paint(RESET);
    let bold = paint(BOLD);
    let dim = paint(DIM);

    match &dataset.outcome {
        DatasetOutcome::Scored {
            counts,
            skipped,
            metrics,
        } => {
            out.push_str(&format!(
                "{bold}{}{reset} {dim}({}, {} observations, {} skipped){reset}\n",
                dataset.name,
                dataset.kind,
                counts.total(),
                skipped
            ));
            out.push_str(&format!(
                "{dim}  Digit   Benford [%]   Observed [%]   Deviation{reset}\n"
            ));
            for i in 0..9 {
                out.push_str(&format!(
                    "  {}       {:>5.2}         {:>5.2}          {:+.6}\n",
                    i + 1,
                    metrics.expected[i] * 100.0,
                    metrics.observed[i] * 100.0,
                    metrics.deviations[i]
                ));
            }
            out.push_str(&format!(
                "  chi2: {:.4}  p: {:.4}  MAD: {:.6}  max dev: {:+.6}  V: {:.4}\n",
                metrics.chi_square,
                metrics.p_value,
                metrics.mad,
                metrics.max_deviation,
                metrics.cramers_v
            ));

            let practical_c = paint(grade_color(metrics.practical_grade));
            let significance_c = paint(grade_color(metrics.significance_grade));
            out.push_str(&format!(
                "  Practical fit: {bold}{:.1}/100{reset} {practical_c}{}{reset}   Significance: {:.1}/100 {significance_c}{}{reset}\n",
                metrics.practical_fit,
                metrics.practical_grade,
                metrics.significance,
                metrics.significance_grade
            ));

            let mad_c = paint(grade_color(metrics.mad_grade));
            out.push_str(&format!(
                "  RESULT: {mad_c}{bold}{}{reset} (MAD band)\n",
                metrics.mad_grade
            ));
        }
        DatasetOutcome::Failed { reason } => {
            let red = paint("\x1b[31m");
            out.push_str(&format!(
                "{bold}{}{reset} {dim}({}){reset}\n",
                dataset.name, dataset.kind
            ));
            out.push_str(&format!("  {red}FAILED:{reset} {reason}\n"));
        }
    }
    out
}
