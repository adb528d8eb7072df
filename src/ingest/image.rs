//! Pixel-magnitude ingestion for image datasets
//!
//! Every pixel of the decoded image yields one observation: the leading
//! decimal digit of the product of its RGBA channels, with zero channels
//! floored to 1 so the product never collapses. The magnitude is at most
//! 255^4, which fits a u32.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::digits::{leading_digit_of, DigitCounts};

/// Channel product with zero channels floored to 1.
pub fn pixel_magnitude(r: u8, g: u8, b: u8, a: u8) -> u32 {
    let floor = |c: u8| -> u32 {
        if c > 0 {
            u32::from(c)
        } else {
            1
        }
    };
    floor(r) * floor(g) * floor(b) * floor(a)
}

pub fn ingest(path: &Path) -> Result<(DigitCounts, u64)> {
    let img = image::open(path)
        .with_context(|| format!("failed to decode {}", path.display()))?
        .to_rgba8();

    let mut counts = DigitCounts::new();
    let mut skipped = 0u64;

    for pixel in img.pixels() {
        let [r, g, b, a] = pixel.0;
        match leading_digit_of(u64::from(pixel_magnitude(r, g, b, a))) {
            Some(digit) => counts.record(digit),
            None => skipped += 1,
        }
    }

    debug!(
        "{}: {}x{} px, {} observations",
        path.display(),
        img.width(),
        img.height(),
        counts.total()
    );
    Ok((counts, skipped))
}
