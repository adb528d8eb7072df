//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates reports suitable for:
//! - Pull request comments
//! - Dashboards and wikis
//! - Documentation

use crate::models::{AnalysisReport, DatasetOutcome, DatasetReport, Grade};
use anyhow::Result;
use chrono::Local;

/// Render report as GitHub-flavored Markdown
pub fn render(report: &AnalysisReport) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(report));
    md.push('\n');

    md.push_str(&render_summary(report));
    md.push('\n');

    for dataset in &report.datasets {
        md.push_str(&render_dataset(dataset));
        md.push('\n');
    }

    md.push_str(&render_footer());
    Ok(md)
}

fn grade_emoji(grade: Grade) -> &'static str {
    match grade {
        Grade::Close => "✅",
        Grade::Acceptable => "🟢",
        Grade::Marginal => "⚠️",
        Grade::NonConforming => "❌",
    }
}

fn render_header(report: &AnalysisReport) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!(
        r#"# Benford Conformity Report

**Datasets: {}** | **Scored: {}** | **Failed: {}**

Generated: {}
"#,
        report.summary.datasets, report.summary.scored, report.summary.failed, timestamp
    )
}

fn render_summary(report: &AnalysisReport) -> String {
    let mut md = String::from("## Summary\n\n");
    md.push_str("| Dataset | Kind | Practical Fit | Grade | Significance | MAD Band |\n");
    md.push_str("|---------|------|---------------|-------|--------------|----------|\n");
    for dataset in &report.datasets {
        match &dataset.outcome {
            DatasetOutcome::Scored { metrics, .. } => {
                md.push_str(&format!(
                    "| {} | {} | {:.1} | {} {} | {:.1} | {} |\n",
                    dataset.name,
                    dataset.kind,
                    metrics.practical_fit,
                    grade_emoji(metrics.practical_grade),
                    metrics.practical_grade,
                    metrics.significance,
                    metrics.mad_grade
                ));
            }
            DatasetOutcome::Failed { .. } => {
                md.push_str(&format!(
                    "| {} | {} | — | 💥 failed | — | — |\n",
                    dataset.name, dataset.kind
                ));
            }
        }
    }
    md
}

fn render_dataset(dataset: &DatasetReport) -> String {
    let mut md = format!("## {}\n\n", dataset.name);

    match &dataset.outcome {
        DatasetOutcome::Scored {
            counts,
            skipped,
            metrics,
        } => {
            md.push_str(&format!(
                "{} observations ({} skipped)\n\n",
                counts.total(),
                skipped
            ));
            md.push_str("| Digit | Benford [%] | Observed [%] | Deviation |\n");
            md.push_str("|-------|-------------|--------------|----------|\n");
            for i in 0..9 {
                md.push_str(&format!(
                    "| {} | {:.2} | {:.2} | {:+.6} |\n",
                    i + 1,
                    metrics.expected[i] * 100.0,
                    metrics.observed[i] * 100.0,
                    metrics.deviations[i]
                ));
            }
            md.push('\n');
            md.push_str(&format!(
                "- **Chi-square**: {:.4} (p = {:.4})\n",
                metrics.chi_square, metrics.p_value
            ));
            md.push_str(&format!(
                "- **MAD**: {:.6} ({} band)\n",
                metrics.mad, metrics.mad_grade
            ));
            md.push_str(&format!(
                "- **Max deviation**: {:+.6}\n",
                metrics.max_deviation
            ));
            md.push_str(&format!("- **Cramér's V**: {:.4}\n", metrics.cramers_v));
            md.push_str(&format!(
                "- **Practical fit**: {:.1}/100 ({} {})\n",
                metrics.practical_fit,
                grade_emoji(metrics.practical_grade),
                metrics.practical_grade
            ));
            md.push_str(&format!(
                "- **Significance**: {:.1}/100 ({})\n",
                metrics.significance, metrics.significance_grade
            ));
        }
        DatasetOutcome::Failed { reason } => {
            md.push_str(&format!("💥 **Analysis failed**: {}\n", reason));
        }
    }
    md
}

fn render_footer() -> String {
    "---\n\n*Generated by [benford](https://github.com/Zach-hammad/benford)*\n".to_string()
}
