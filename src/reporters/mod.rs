//! Output reporters for Benford analysis results
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON
//! - `markdown` - GitHub-flavored Markdown
//!
//! Reporters only render; every number they print was computed by the
//! pipeline beforehand.

mod json;
mod markdown;
mod text;

use crate::models::AnalysisReport;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Render an analysis report in the specified format.
///
/// `color` only affects the text reporter; the others are plain by nature.
pub fn report(report: &AnalysisReport, format: OutputFormat, color: bool) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report, color),
        OutputFormat::Json => json::render(report),
        OutputFormat::Markdown => markdown::render(report),
    }
}

/// Get the recommended file extension for a format
pub fn file_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::digits::DigitCounts;
    use crate::models::{DatasetKind, DatasetOutcome, DatasetReport};
    use crate::scoring::FitScorer;

    /// Create a small report with one scored and one failed dataset.
    pub(crate) fn test_report() -> AnalysisReport {
        let mut counts = DigitCounts::new();
        for (digit, n) in [
            (1u8, 301u64),
            (2, 176),
            (3, 125),
            (4, 97),
            (5, 79),
            (6, 68),
            (7, 59),
            (8, 52),
            (9, 47),
        ] {
            for _ in 0..n {
                counts.record(digit);
            }
        }
        let metrics = FitScorer::default().score(&counts).expect("score fixture");

        AnalysisReport::new(vec![
            DatasetReport {
                name: "tallies.txt".into(),
                kind: DatasetKind::Text,
                source: Some("data/tallies.txt".into()),
                outcome: DatasetOutcome::Scored {
                    counts,
                    skipped: 3,
                    metrics,
                },
            },
            DatasetReport {
                name: "empty.txt".into(),
                kind: DatasetKind::Text,
                source: Some("data/empty.txt".into()),
                outcome: DatasetOutcome::Failed {
                    reason: "dataset contains no digit observations".into(),
                },
            },
        ])
    }

    #[test]
    fn format_parses_and_displays() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Markdown.to_string(), "markdown");
    }

    #[test]
    fn every_format_renders_the_fixture() {
        let fixture = test_report();
        for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Markdown] {
            let out = report(&fixture, format, false).expect("render");
            assert!(out.contains("tallies.txt"), "{format} output misses dataset");
        }
    }

    #[test]
    fn extensions_match_formats() {
        assert_eq!(file_extension(OutputFormat::Text), "txt");
        assert_eq!(file_extension(OutputFormat::Json), "json");
        assert_eq!(file_extension(OutputFormat::Markdown), "md");
    }
}
