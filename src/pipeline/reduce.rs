//! Abnormal-value reduction for paired first-day lab extremes
//!
//! Each analyte arrives as a `(<analyte>_min, <analyte>_max)` pair of first-day
//! extremes. The reducer collapses the pair into one value representing the
//! most clinically abnormal observation, per an analyte-specific rule, then
//! removes both source columns. The rule table is serde data so the clinical
//! policy can be audited, versioned, and overridden without touching the
//! reduction code.

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// How to collapse a `(min, max)` observation pair into one value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ReductionRule {
    /// Abnormality only below the reference range: keep the minimum, discard
    /// the maximum entirely.
    KeepMin,
    /// Abnormality only above the reference range: keep the maximum, discard
    /// the minimum entirely.
    KeepMax,
    /// Abnormal in both directions: keep whichever extreme deviates further
    /// from the reference range. Ties take the minimum.
    Deviation { lower: f64, upper: f64 },
    /// Threshold on the raw minimum (white-cell differential): keep the
    /// minimum when it falls below the clinical cutoff, else the maximum.
    /// Distinct from the deviation rule: the comparison is on the raw value,
    /// not on distance from a range.
    LowThreshold { cutoff: f64 },
}

impl ReductionRule {
    /// Collapse one observation pair.
    ///
    /// Missing propagates: both bounds missing yields missing, and the
    /// direction-aware rules fall back to the surviving bound when only one
    /// is present. No imputation happens here.
    pub fn reduce(&self, min: Option<f64>, max: Option<f64>) -> Option<f64> {
        match *self {
            ReductionRule::KeepMin => min,
            ReductionRule::KeepMax => max,
            ReductionRule::Deviation { lower, upper } => match (min, max) {
                (Some(m), Some(x)) => {
                    if (m - lower).abs() >= (x - upper).abs() {
                        Some(m)
                    } else {
                        Some(x)
                    }
                }
                (Some(m), None) => Some(m),
                (None, other) => other,
            },
            ReductionRule::LowThreshold { cutoff } => match (min, max) {
                (Some(m), Some(x)) => {
                    if m < cutoff {
                        Some(m)
                    } else {
                        Some(x)
                    }
                }
                (Some(m), None) => Some(m),
                (None, other) => other,
            },
        }
    }
}

/// One analyte and the rule that reduces its observation pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalytePolicy {
    pub analyte: String,
    #[serde(flatten)]
    pub rule: ReductionRule,
}

/// The full per-analyte reduction policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReductionPolicy {
    pub entries: Vec<AnalytePolicy>,
}

impl Default for ReductionPolicy {
    fn default() -> Self {
        use ReductionRule::{Deviation, KeepMax, KeepMin, LowThreshold};

        let keep_min = [
            "bicarbonate",
            "platelets",
            "hemoglobin",
            "fibrinogen",
            "hematocrit",
            "albumin",
            "ionizedcalcium",
        ];
        let keep_max = [
            "creatinine",
            "alt",
            "ast",
            "alkphos",
            "bun",
            "bilirubin",
            "pt",
            "ptt",
            "inr",
            "lactate",
            "troponin_i",
            "amylase",
            "lipase",
            "cpk",
        ];

        let mut entries: Vec<AnalytePolicy> = Vec::new();
        for analyte in keep_min {
            entries.push(AnalytePolicy {
                analyte: analyte.to_string(),
                rule: KeepMin,
            });
        }
        for analyte in keep_max {
            entries.push(AnalytePolicy {
                analyte: analyte.to_string(),
                rule: KeepMax,
            });
        }
        entries.push(AnalytePolicy {
            analyte: "sodium".to_string(),
            rule: Deviation {
                lower: 135.0,
                upper: 145.0,
            },
        });
        entries.push(AnalytePolicy {
            analyte: "potassium".to_string(),
            rule: Deviation {
                lower: 3.5,
                upper: 5.0,
            },
        });
        entries.push(AnalytePolicy {
            analyte: "wbc".to_string(),
            rule: LowThreshold { cutoff: 2.0 },
        });
        entries.push(AnalytePolicy {
            analyte: "neutrophils".to_string(),
            rule: LowThreshold { cutoff: 45.0 },
        });
        entries.push(AnalytePolicy {
            analyte: "lymphocytes".to_string(),
            rule: LowThreshold { cutoff: 20.0 },
        });

        ReductionPolicy { entries }
    }
}

impl ReductionPolicy {
    /// Load a policy override from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read reduction policy: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid reduction policy JSON: {}", path.display()))
    }

    /// Look up the rule for an analyte, if the policy covers it.
    pub fn rule_for(&self, analyte: &str) -> Option<ReductionRule> {
        self.entries
            .iter()
            .find(|e| e.analyte == analyte)
            .map(|e| e.rule)
    }
}

/// Apply the reduction policy: one new `<analyte>` column per entry, both
/// source columns removed.
///
/// The sentinel pass must already have run; this function assumes `-1` no
/// longer appears as data. Analytes are independent, so the per-row work runs
/// in parallel and the results are appended in policy order to keep the
/// output schema deterministic.
pub fn apply_reduction(df: DataFrame, policy: &ReductionPolicy) -> Result<DataFrame> {
    let reduced: Vec<Column> = policy
        .entries
        .par_iter()
        .map(|entry| reduce_analyte(&df, entry))
        .collect::<Result<Vec<_>>>()?;

    let mut out = df;
    let mut drops: Vec<String> = Vec::with_capacity(policy.entries.len() * 2);
    for (entry, column) in policy.entries.iter().zip(reduced) {
        out.with_column(column)?;
        drops.push(format!("{}_min", entry.analyte));
        drops.push(format!("{}_max", entry.analyte));
    }

    Ok(out.drop_many(&drops))
}

fn reduce_analyte(df: &DataFrame, entry: &AnalytePolicy) -> Result<Column> {
    let min_name = format!("{}_min", entry.analyte);
    let max_name = format!("{}_max", entry.analyte);

    let min = df
        .column(&min_name)
        .with_context(|| format!("Missing lab column '{}'", min_name))?
        .cast(&DataType::Float64)?;
    let max = df
        .column(&max_name)
        .with_context(|| format!("Missing lab column '{}'", max_name))?
        .cast(&DataType::Float64)?;

    let values: Vec<Option<f64>> = min
        .f64()?
        .into_iter()
        .zip(max.f64()?)
        .map(|(m, x)| entry.rule.reduce(m, x))
        .collect();

    Ok(Column::new(entry.analyte.as_str().into(), values))
}
