//! Inclusion/exclusion filtering for the joined cohort
//!
//! Each predicate is an independent boolean mask over a disjoint concern, so
//! the sequence is order-insensitive. Exclusion is expected behavior, never an
//! error: a row that fails a predicate is simply dropped. The trace records
//! the surviving row count after every step for the run report.

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;

use super::columns::{
    ADMISSION_DX, AGE, DX_SURGICAL_EXCLUSIONS, HEIGHT, HEIGHT_RANGE, MIN_AGE,
    MIN_UNIT_STAY_MINUTES, OVER_89_AGE, OVER_89_PLACEHOLDER, UNIT_DISCHARGE_OFFSET, WEIGHT,
    WEIGHT_RANGE,
};

/// One filter step and the rows remaining after it was applied.
#[derive(Debug, Clone, Serialize)]
pub struct FilterStep {
    pub name: String,
    pub rows: usize,
}

/// Row counts through the filter sequence, starting from the joined table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FilterTrace {
    pub steps: Vec<FilterStep>,
}

impl FilterTrace {
    fn record(&mut self, name: &str, rows: usize) {
        self.steps.push(FilterStep {
            name: name.to_string(),
            rows,
        });
    }

    /// Rows remaining after the last recorded step.
    pub fn final_rows(&self) -> Option<usize> {
        self.steps.last().map(|s| s.rows)
    }

    /// Row counts must never increase through the sequence.
    pub fn is_monotonic(&self) -> bool {
        self.steps.windows(2).all(|w| w[1].rows <= w[0].rows)
    }
}

/// Normalize the age column before any numeric comparison.
///
/// The de-identified source stores age as text and uses a placeholder for
/// patients older than 89; that placeholder becomes a fixed numeric
/// substitute, anything else is cast to Float64, and rows whose age does not
/// parse are dropped.
pub fn normalize_age(df: DataFrame) -> Result<DataFrame> {
    df.lazy()
        .with_column(
            when(col(AGE).cast(DataType::String).eq(lit(OVER_89_PLACEHOLDER)))
                .then(lit(OVER_89_AGE))
                .otherwise(col(AGE).cast(DataType::Float64))
                .alias(AGE),
        )
        .filter(col(AGE).is_not_null())
        .collect()
        .context("Failed to normalize age column")
}

/// Apply all inclusion/exclusion predicates, recording row counts per step.
pub fn apply_inclusion_criteria(df: DataFrame) -> Result<(DataFrame, FilterTrace)> {
    let mut trace = FilterTrace::default();
    trace.record("joined cohort", df.height());

    let df = normalize_age(df)?;
    trace.record("age parseable", df.height());

    let df = keep(df, col(AGE).gt_eq(lit(MIN_AGE)))?;
    trace.record("adult (age >= 18)", df.height());

    let df = keep(
        df,
        col(UNIT_DISCHARGE_OFFSET).gt_eq(lit(MIN_UNIT_STAY_MINUTES)),
    )?;
    trace.record("unit stay >= 4h", df.height());

    let df = keep(df, non_surgical_predicate())?;
    trace.record("non-surgical bleed", df.height());

    let df = keep(
        df,
        in_closed_range(WEIGHT, WEIGHT_RANGE).and(in_closed_range(HEIGHT, HEIGHT_RANGE)),
    )?;
    trace.record("plausible weight/height", df.height());

    Ok((df, trace))
}

/// Diagnosis must differ from every surgical bleed subtype.
/// A missing diagnosis is not grounds for exclusion here.
fn non_surgical_predicate() -> Expr {
    DX_SURGICAL_EXCLUSIONS
        .iter()
        .fold(lit(true), |acc, dx| {
            acc.and(col(ADMISSION_DX).neq(lit(*dx)))
        })
        .or(col(ADMISSION_DX).is_null())
}

fn in_closed_range(name: &str, (lo, hi): (f64, f64)) -> Expr {
    col(name).gt_eq(lit(lo)).and(col(name).lt_eq(lit(hi)))
}

fn keep(df: DataFrame, predicate: Expr) -> Result<DataFrame> {
    df.lazy()
        .filter(predicate)
        .collect()
        .context("Failed to apply inclusion predicate")
}
