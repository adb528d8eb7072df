//! Dataset discovery and ingestion
//!
//! Maps CLI path arguments to concrete dataset sources and feeds each one
//! into a fresh accumulator. A file argument becomes a single dataset; a
//! directory argument becomes a named group whose supported files are each
//! a dataset and which additionally aggregates their union.
//!
//! All file I/O lives here; the statistical core only ever sees in-memory
//! digit counts.

pub mod image;
pub mod text;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use tracing::debug;
use walkdir::WalkDir;

use crate::digits::DigitCounts;

/// Extensions ingested as line-oriented numeric text.
pub const TEXT_EXTENSIONS: &[&str] = &["txt", "csv", "tsv", "dat", "list"];

/// Extensions ingested as images (pixel magnitude datasets).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tif", "tiff"];

/// How a source file is ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Text,
    Image,
}

/// One concrete file to ingest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSource {
    pub path: PathBuf,
    pub kind: SourceKind,
}

/// Sources discovered under one CLI path argument.
///
/// Directory groups carry `aggregate = true`: their members are scored
/// individually and once more as a union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetGroup {
    pub name: String,
    pub sources: Vec<DatasetSource>,
    pub aggregate: bool,
}

/// Classify a path by extension, case-insensitively.
pub fn source_kind(path: &Path) -> Option<SourceKind> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    if TEXT_EXTENSIONS.contains(&ext.as_str()) {
        Some(SourceKind::Text)
    } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(SourceKind::Image)
    } else {
        None
    }
}

/// Expand CLI path arguments into dataset groups.
///
/// Directories are walked recursively in file-name order so repeated runs
/// see datasets in the same sequence. Unsupported files inside a directory
/// are skipped; naming one directly is an error.
pub fn discover(paths: &[PathBuf]) -> Result<Vec<DatasetGroup>> {
    let mut groups = Vec::new();

    for path in paths {
        if !path.exists() {
            bail!("path does not exist: {}", path.display());
        }

        if path.is_file() {
            let Some(kind) = source_kind(path) else {
                bail!(
                    "unsupported file type: {} (expected one of: {} / {})",
                    path.display(),
                    TEXT_EXTENSIONS.join(", "),
                    IMAGE_EXTENSIONS.join(", ")
                );
            };
            groups.push(DatasetGroup {
                name: display_name(path),
                sources: vec![DatasetSource {
                    path: path.clone(),
                    kind,
                }],
                aggregate: false,
            });
            continue;
        }

        let mut sources = Vec::new();
        for entry in WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            if let Some(kind) = source_kind(entry.path()) {
                sources.push(DatasetSource {
                    path: entry.path().to_path_buf(),
                    kind,
                });
            } else {
                debug!("skipping unsupported file {}", entry.path().display());
            }
        }

        if sources.is_empty() {
            bail!("no supported dataset files under {}", path.display());
        }

        groups.push(DatasetGroup {
            name: display_name(path),
            sources,
            aggregate: true,
        });
    }

    Ok(groups)
}

/// Ingest one source into a fresh accumulator.
///
/// Returns the counts plus the number of observations that carried no
/// significant digit.
pub fn ingest(source: &DatasetSource) -> Result<(DigitCounts, u64)> {
    match source.kind {
        SourceKind::Text => text::ingest(&source.path),
        SourceKind::Image => image::ingest(&source.path),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
