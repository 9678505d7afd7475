//! Feature curation: drop lists, one-hot encoding, composite score
//!
//! The two drop lists encode domain judgment made outside this pipeline
//! (superseded signals, and columns found not significant / collinear /
//! excessively missing in prior statistical analysis). They are serde data
//! with compiled-in defaults so the clinical justification can be revised
//! without touching the transformation code.

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::columns::{
    ADMISSION_DX, APACHE_SCORE, DX_INDICATORS, DX_VOCABULARY, GCS_EYES, GCS_MOTOR, GCS_TOTAL,
    GCS_VERBAL, HEIGHT, HOSPITAL_DISCHARGE_OFFSET, STAY_ID, UNIT_DISCHARGE_OFFSET,
};

/// Externally decided drop lists applied during curation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurationConfig {
    /// Columns superseded by a preferred alternative signal, plus
    /// administrative columns with no modeling value.
    pub superseded: Vec<String>,
    /// Columns found not significant, weakly correlated with outcome,
    /// collinear with a retained feature, or excessively missing.
    pub not_significant: Vec<String>,
}

impl Default for CurationConfig {
    fn default() -> Self {
        let superseded = [
            // Periodic (invasive) pressures superseded by the aperiodic cuff
            // means, which are recorded for nearly every stay.
            "systolic_periodic_mean",
            "diastolic_periodic_mean",
            "map_periodic_mean",
            // Auto-captured temperature is unreliable in this source.
            "temperature_mean",
            // Ratio of independently retained vitals.
            "shock_index",
            // Administrative length-of-stay and admit-source columns.
            UNIT_DISCHARGE_OFFSET,
            HOSPITAL_DISCHARGE_OFFSET,
            "unittype",
            "unitadmitsource",
        ];
        let not_significant = [
            "gender",
            "ethnicity",
            HEIGHT,
            "map_aperiodic_mean",
            APACHE_SCORE,
            // Reduced lab features with excessive missingness in this cohort.
            "fibrinogen",
            "troponin_i",
            "amylase",
            "lipase",
            "cpk",
            "ionizedcalcium",
            // Comorbidity flags without signal in prior analysis.
            "aids",
            "leukemia",
            "lymphoma",
        ];

        CurationConfig {
            superseded: superseded.iter().map(|s| s.to_string()).collect(),
            not_significant: not_significant.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CurationConfig {
    /// Load a drop-list override from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read curation config: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid curation config JSON: {}", path.display()))
    }
}

/// Columns actually removed during curation, for the run report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CurationOutcome {
    pub dropped_superseded: Vec<String>,
    pub dropped_not_significant: Vec<String>,
}

/// Finalize the feature matrix: apply both drop lists, one-hot encode the
/// admission diagnosis, and derive the composite GCS score.
///
/// The sentinel pass has already run by this point. Output contains only
/// numeric/indicator features plus the outcome and benchmark columns; the
/// stay identifier is removed so it cannot leak into the model.
pub fn curate(df: DataFrame, config: &CurationConfig) -> Result<(DataFrame, CurationOutcome)> {
    let mut outcome = CurationOutcome::default();

    let df = drop_existing(df, &config.superseded, &mut outcome.dropped_superseded);
    let df = drop_existing(
        df,
        &config.not_significant,
        &mut outcome.dropped_not_significant,
    );

    let df = encode_admission_diagnosis(df)?;
    let df = derive_gcs_total(df)?;
    let df = df.drop_many([STAY_ID]);

    Ok((df, outcome))
}

/// Drop the listed columns that are present, recording what was removed.
/// Absent names are ignored: the drop lists are shared across cohort extracts
/// whose schemas differ slightly.
fn drop_existing(df: DataFrame, names: &[String], dropped: &mut Vec<String>) -> DataFrame {
    let present: Vec<String> = names
        .iter()
        .filter(|n| df.column(n).is_ok())
        .cloned()
        .collect();
    dropped.extend(present.iter().cloned());
    df.drop_many(&present)
}

/// One-hot encode the admission diagnosis over its fixed vocabulary.
///
/// The first vocabulary entry is the reference category and gets no indicator
/// (dummy-variable trap); the categorical column itself is removed. A row
/// with all indicators zero is therefore the reference subtype.
pub fn encode_admission_diagnosis(df: DataFrame) -> Result<DataFrame> {
    let indicators: Vec<Expr> = DX_VOCABULARY
        .iter()
        .skip(1)
        .zip(DX_INDICATORS.iter())
        .map(|(category, indicator)| {
            when(col(ADMISSION_DX).eq(lit(*category)))
                .then(lit(1i32))
                .otherwise(lit(0i32))
                .alias(*indicator)
        })
        .collect();

    let out = df
        .lazy()
        .with_columns(indicators)
        .collect()
        .context("Failed to one-hot encode admission diagnosis")?;
    Ok(out.drop_many([ADMISSION_DX]))
}

/// Sum the three GCS sub-scores into one composite; missing propagates.
pub fn derive_gcs_total(df: DataFrame) -> Result<DataFrame> {
    let out = df
        .lazy()
        .with_column((col(GCS_EYES) + col(GCS_MOTOR) + col(GCS_VERBAL)).alias(GCS_TOTAL))
        .collect()
        .context("Failed to derive composite GCS score")?;
    Ok(out.drop_many([GCS_EYES, GCS_MOTOR, GCS_VERBAL]))
}
