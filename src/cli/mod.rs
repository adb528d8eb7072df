//! CLI command definitions and handlers

pub(crate) mod analyze;
mod init;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::Grade;

/// Benford - leading-digit conformity analysis
///
/// 100% LOCAL - No account needed. No data leaves your machine.
#[derive(Parser, Debug)]
#[command(name = "benford")]
#[command(
    version,
    about = "Test numeric datasets and images against Benford's Law — chi-square, MAD banding, Cramér's V, and a composite fit grade",
    long_about = "Benford tabulates the leading significant digits of numeric datasets \
(line-oriented text files, or images scanned pixel by pixel) and scores the observed \
frequencies against Benford's Law.\n\n\
Each dataset gets a chi-square goodness-of-fit p-value, MAD banding, a Cramér's V \
effect size, and a weighted composite practical-fit score with a discrete grade.\n\n\
100% LOCAL — No account needed. No data leaves your machine.\n\n\
Run without a subcommand to analyze the given paths:\n  \
benford data/",
    after_help = "\
Examples:
  benford votes.txt                       Analyze one text dataset
  benford data/                           Analyze every dataset in a directory (plus their union)
  benford analyze data/ --format json     JSON output for scripting
  benford analyze data/ -o report.md -f md   Write a Markdown report
  benford analyze a.txt b.txt --aggregate    Also score the union of all inputs
  benford analyze data/ --fail-on marginal   Exit 1 if any grade is Marginal or worse (CI mode)

Documentation: https://github.com/Zach-hammad/benford"
)]
pub struct Cli {
    /// Dataset files or directories to analyze (default: current directory)
    pub paths: Vec<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a benford.toml config file with example settings
    Init,

    /// Analyze datasets for Benford conformity
    #[command(after_help = "\
Examples:
  benford analyze votes.txt                   Analyze one dataset
  benford analyze data/                       Every supported file under data/, plus their union
  benford analyze data/ --format json         JSON output for scripting
  benford analyze data/ -f md -o report.md    Markdown report written to disk
  benford analyze data/ --fail-on marginal    Exit 1 if any grade is Marginal or worse
  benford analyze data/ --no-color            Plain output for CI logs")]
    Analyze {
        /// Dataset files or directories
        #[arg(value_name = "PATHS")]
        paths: Vec<PathBuf>,

        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json", "markdown", "md"])]
        format: String,

        /// Output file path (default: stdout only)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Also score the union of every input as one dataset
        #[arg(long)]
        aggregate: bool,

        /// Exit with code 1 if any practical-fit grade is at or below this band
        /// Values: close, acceptable, marginal, non-conforming
        #[arg(long, value_name = "GRADE")]
        fail_on: Option<Grade>,

        /// Disable colors in output (cleaner for CI logs)
        #[arg(long)]
        no_color: bool,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    let code = match cli.command {
        Some(Commands::Init) => {
            init::run()?;
            0
        }
        Some(Commands::Analyze {
            paths,
            format,
            output,
            aggregate,
            fail_on,
            no_color,
        }) => analyze::run(analyze::AnalyzeArgs {
            paths: default_paths(paths),
            format,
            output,
            aggregate,
            fail_on,
            no_color,
        })?,
        None => analyze::run(analyze::AnalyzeArgs {
            paths: default_paths(cli.paths),
            ..Default::default()
        })?,
    };

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

fn default_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths
    }
}
