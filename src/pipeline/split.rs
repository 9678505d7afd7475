//! Stratified train/test partitioning
//!
//! The label is binarized, then label and benchmark prediction are separated
//! from the feature matrix and the rows are partitioned 80/20 with stratified
//! sampling on the label, so both partitions preserve the overall prevalence.
//! A fixed seed makes the shuffle reproducible run to run.

use anyhow::{Context, Result};
use polars::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::columns::{BENCHMARK, DISCHARGE_STATUS, EXPIRED, LABEL};

/// The six artifacts of the split, row-aligned within each partition.
#[derive(Debug)]
pub struct SplitFrames {
    pub x_train: DataFrame,
    pub y_train: DataFrame,
    pub benchmark_train: DataFrame,
    pub x_test: DataFrame,
    pub y_test: DataFrame,
    pub benchmark_test: DataFrame,
}

impl SplitFrames {
    /// Fraction of expired stays in a label frame.
    pub fn prevalence(y: &DataFrame) -> Result<f64> {
        let labels = y.column(LABEL)?.i32()?;
        let total = labels.len().max(1) as f64;
        let events: i64 = labels.into_iter().flatten().map(i64::from).sum();
        Ok(events as f64 / total)
    }
}

/// Replace the discharge-status column with a binary `expired` label
/// (encoded-as-expired category becomes 1, anything else 0).
pub fn binarize_label(df: DataFrame) -> Result<DataFrame> {
    let out = df
        .lazy()
        .with_column(
            when(col(DISCHARGE_STATUS).eq(lit(EXPIRED)))
                .then(lit(1i32))
                .otherwise(lit(0i32))
                .alias(LABEL),
        )
        .collect()
        .context("Failed to binarize outcome label")?;
    Ok(out.drop_many([DISCHARGE_STATUS]))
}

/// Separate label and benchmark from the features and partition the rows.
pub fn stratified_split(df: &DataFrame, train_fraction: f64, seed: u64) -> Result<SplitFrames> {
    let labels: Vec<i32> = df
        .column(LABEL)
        .context("Label column missing before split")?
        .i32()?
        .into_iter()
        .map(|v| v.context("Label must not be null at split time"))
        .collect::<Result<_>>()?;

    let (train_idx, test_idx) = stratified_indices(&labels, train_fraction, seed);

    let features = df.drop_many([LABEL, BENCHMARK]);
    let y = df.select([LABEL])?;
    let benchmark = df.select([BENCHMARK])?;

    let train = IdxCa::from_vec("idx".into(), train_idx);
    let test = IdxCa::from_vec("idx".into(), test_idx);

    Ok(SplitFrames {
        x_train: features.take(&train)?,
        y_train: y.take(&train)?,
        benchmark_train: benchmark.take(&train)?,
        x_test: features.take(&test)?,
        y_test: y.take(&test)?,
        benchmark_test: benchmark.take(&test)?,
    })
}

/// Per-class shuffled index partition.
///
/// Classes are processed in ascending label order and each class is shuffled
/// with its own draw from the seeded RNG, so the same seed always yields the
/// same partition. The per-class train count is `round(n * fraction)`, which
/// keeps each partition's prevalence within rounding distance of the whole
/// table's.
pub fn stratified_indices(labels: &[i32], train_fraction: f64, seed: u64) -> (Vec<u32>, Vec<u32>) {
    let mut classes: Vec<i32> = labels.to_vec();
    classes.sort_unstable();
    classes.dedup();

    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut train_idx: Vec<u32> = Vec::new();
    let mut test_idx: Vec<u32> = Vec::new();

    for class in classes {
        let mut members: Vec<u32> = labels
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == class)
            .map(|(i, _)| i as u32)
            .collect();
        members.shuffle(&mut rng);

        let n_train = (members.len() as f64 * train_fraction).round() as usize;
        let n_train = n_train.min(members.len());
        test_idx.extend_from_slice(&members[n_train..]);
        train_idx.extend_from_slice(&members[..n_train]);
    }

    (train_idx, test_idx)
}
