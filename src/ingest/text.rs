//! Line-oriented numeric text ingestion
//!
//! Each non-empty line of the file is one token; its leading significant
//! digit (if any) becomes one observation. Tokens with no significant
//! digit contribute nothing to the counts or the total, but are tallied
//! as skipped for the report.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::digits::{leading_digit, DigitCounts};

pub fn ingest(path: &Path) -> Result<(DigitCounts, u64)> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;

    let mut counts = DigitCounts::new();
    let mut skipped = 0u64;

    for line in BufReader::new(file).lines() {
        let line = line.with_context(|| format!("failed to read {}", path.display()))?;
        let token = line.trim();
        if token.is_empty() {
            continue;
        }
        match leading_digit(token) {
            Some(digit) => counts.record(digit),
            None => skipped += 1,
        }
    }

    debug!(
        "{}: {} observations, {} skipped",
        path.display(),
        counts.total(),
        skipped
    );
    Ok((counts, skipped))
}
