//! Sentinel recoding and missing value analysis
//!
//! The source views encode "not recorded" as `-1` in numeric columns. That
//! sentinel must become a real null in one global pass before the reducer
//! runs, otherwise the deviation and threshold rules would read `-1` as a
//! valid extreme observation.

use anyhow::{Context, Result};
use polars::prelude::*;

use super::columns::MISSING_SENTINEL;

/// Replace every `-1` in every numeric column with null.
///
/// A single pass over the whole table, not column-scoped: any numeric column,
/// present or future, gets the same treatment.
pub fn replace_sentinel_missing(df: DataFrame) -> Result<DataFrame> {
    let recodes: Vec<Expr> = df
        .get_columns()
        .iter()
        .filter(|c| c.dtype().is_primitive_numeric())
        .map(|c| {
            let name = c.name().as_str();
            when(col(name).eq(lit(MISSING_SENTINEL)))
                .then(lit(NULL))
                .otherwise(col(name))
                .alias(name)
        })
        .collect();

    if recodes.is_empty() {
        return Ok(df);
    }

    df.lazy()
        .with_columns(recodes)
        .collect()
        .context("Failed to recode sentinel missing values")
}

/// Per-column missing ratio (`null_count / row_count`), sorted descending.
///
/// Informational only: the pipeline never imputes, but the run report records
/// how sparse each column was before curation.
pub fn missing_ratios(df: &DataFrame) -> Result<Vec<(String, f64)>> {
    if df.height() == 0 {
        return Ok(Vec::new());
    }

    let rows = df.height() as f64;
    let mut ratios: Vec<(String, f64)> = df
        .get_columns()
        .iter()
        .map(|c| (c.name().to_string(), c.null_count() as f64 / rows))
        .collect();

    ratios.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    Ok(ratios)
}
