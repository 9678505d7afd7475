//! Cohort loading: read the two source views and join them on stay id

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

use super::columns::STAY_ID;

/// Load a source table from a file (CSV or Parquet based on extension).
///
/// `infer_schema_length` controls how many rows the CSV reader scans for type
/// detection; the age column must come through as text so the over-89
/// placeholder survives until the filter stage normalizes it.
pub fn load_table(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(Some(infer_schema_length))
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    lf.collect()
        .with_context(|| format!("Failed to read table: {}", path.display()))
}

/// Inner-join the base cohort with the first-day feature set on stay id.
///
/// Rows present in only one source are dropped by design: an encounter without
/// recorded first-day vitals is not usable for feature-based modeling, and a
/// feature row outside the base cohort fails the admission criteria.
pub fn join_cohort(base: DataFrame, features: DataFrame) -> Result<DataFrame> {
    for (name, df) in [("base cohort", &base), ("feature set", &features)] {
        if df.column(STAY_ID).is_err() {
            anyhow::bail!("{} table has no '{}' join column", name, STAY_ID);
        }
    }

    // Hash joins do not guarantee row order; sort by stay id so every run
    // sees the same row sequence before the seeded split.
    base.lazy()
        .join(
            features.lazy(),
            [col(STAY_ID)],
            [col(STAY_ID)],
            JoinArgs::new(JoinType::Inner),
        )
        .sort([STAY_ID], SortMultipleOptions::default())
        .collect()
        .context("Failed to join base cohort with first-day features")
}
