//! CSV persistence for checkpoints and split artifacts

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::*;

use super::split::SplitFrames;

/// Post-filter, pre-reduction checkpoint.
pub const ALL_CANDIDATES_FILE: &str = "all_candidates.csv";
/// Post-curation, pre-split snapshot. Written without a header row.
pub const COHORT_FILE: &str = "cohort.csv";

/// Write a frame as delimited text.
pub fn write_csv(df: &mut DataFrame, path: &Path, include_header: bool) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(include_header)
        .finish(df)
        .with_context(|| format!("Failed to write CSV: {}", path.display()))?;
    Ok(())
}

/// Persist the six train/test artifacts into `dir`, returning the paths.
pub fn write_split_artifacts(split: &mut SplitFrames, dir: &Path) -> Result<Vec<PathBuf>> {
    let artifacts: [(&str, &mut DataFrame); 6] = [
        ("x_train.csv", &mut split.x_train),
        ("y_train.csv", &mut split.y_train),
        ("apache_train.csv", &mut split.benchmark_train),
        ("x_test.csv", &mut split.x_test),
        ("y_test.csv", &mut split.y_test),
        ("apache_test.csv", &mut split.benchmark_test),
    ];

    let mut paths = Vec::with_capacity(artifacts.len());
    for (name, df) in artifacts {
        let path = dir.join(name);
        write_csv(df, &path, true)?;
        paths.push(path);
    }
    Ok(paths)
}
