//! JSON run report
//!
//! Documents one preparation run end to end: inputs, filter trace, the
//! reduction policy and drop lists that were applied, column missingness
//! before curation, and the split outcome. Written next to the artifacts so
//! every extract carries its own provenance.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{CurationOutcome, FilterTrace, ReductionPolicy};

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub timestamp: String,
    pub ichprep_version: String,
    pub cohort_file: String,
    pub features_file: String,
    pub output_dir: String,
    pub seed: u64,
    pub train_fraction: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MissingEntry {
    pub column: String,
    pub ratio: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SplitOutcome {
    pub train_rows: usize,
    pub test_rows: usize,
    pub train_prevalence: f64,
    pub test_prevalence: f64,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub metadata: ReportMetadata,
    pub filter: FilterTrace,
    pub reduction_policy: ReductionPolicy,
    pub curation: CurationOutcome,
    /// Per-column missing ratios measured after sentinel recoding,
    /// before curation.
    pub missing: Vec<MissingEntry>,
    pub split: SplitOutcome,
}

impl RunReport {
    pub fn metadata(
        cohort_file: &Path,
        features_file: &Path,
        output_dir: &Path,
        seed: u64,
        train_fraction: f64,
    ) -> ReportMetadata {
        ReportMetadata {
            timestamp: Utc::now().to_rfc3339(),
            ichprep_version: env!("CARGO_PKG_VERSION").to_string(),
            cohort_file: cohort_file.display().to_string(),
            features_file: features_file.display().to_string(),
            output_dir: output_dir.display().to_string(),
            seed,
            train_fraction,
        }
    }
}

/// Write the report as pretty-printed JSON.
pub fn write_run_report(report: &RunReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize run report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write run report: {}", path.display()))?;
    Ok(())
}
