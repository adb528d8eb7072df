//! Benford - Leading-digit conformity analysis CLI
//!
//! A fast, local-first tool that tabulates leading significant digits in
//! numeric datasets (text files or images) and scores them against
//! Benford's Law to flag likely manipulation or anomaly.

// Allow dead code for public API methods exposed for library users and future features
#![allow(dead_code)]

mod cli;
pub mod config;
pub mod digits;
mod ingest;
pub mod models;
mod pipeline;
mod reporters;
pub mod scoring;
pub mod stats;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging; RUST_LOG wins over --log-level. Logs go to
    // stderr so report output stays pipeable.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    cli::run(cli)
}
