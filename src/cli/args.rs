//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// Ichprep - prepare an intracranial-hemorrhage cohort for mortality modeling
#[derive(Parser, Debug)]
#[command(name = "ichprep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base cohort table (CSV or Parquet): demographics, diagnosis, severity
    #[arg(short = 'c', long)]
    pub cohort: PathBuf,

    /// First-day vitals/labs/treatments feature table (CSV or Parquet)
    #[arg(short = 'f', long)]
    pub features: PathBuf,

    /// Output directory for checkpoints, artifacts, and the run report
    #[arg(short = 'o', long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Random seed for the stratified train/test shuffle
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Fraction of each label class assigned to the training partition
    #[arg(long, default_value = "0.8", value_parser = validate_train_fraction)]
    pub train_fraction: f64,

    /// JSON file overriding the per-analyte reduction policy.
    /// Defaults to the compiled-in clinical policy.
    #[arg(long)]
    pub policy: Option<PathBuf>,

    /// JSON file overriding the curation drop lists.
    /// Defaults to the compiled-in lists.
    #[arg(long)]
    pub curation: Option<PathBuf>,

    /// Number of rows to use for CSV schema inference.
    /// Higher values improve type detection for sparse lab columns.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

/// Validator for the train_fraction parameter
fn validate_train_fraction(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value <= 0.0 || value >= 1.0 {
        Err(format!(
            "train_fraction must be strictly between 0 and 1, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}
