//! Shared test fixtures and assertion helpers

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Base cohort fixture: twelve stays, one per exclusion path plus survivors.
///
/// Expected filter behavior:
/// - stay 3 has an empty age (dropped at age parsing)
/// - stay 4 is a minor (dropped at age >= 18)
/// - stay 5 stayed 100 minutes (dropped at the 4h minimum)
/// - stay 6 is a surgical bleed (dropped at the diagnosis exclusion)
/// - stay 7 weighs 30 kg, stay 8 is 300 cm tall (dropped at plausibility)
/// - stay 2 is the "> 89" placeholder (normalized to 93, retained)
pub fn create_cohort_frame() -> DataFrame {
    df! {
        "patientunitstayid" => [1i64, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
        "age" => ["45", "> 89", "", "15", "60", "70", "55", "80", "41", "33", "29", "66"],
        "gender" => ["Male", "Female", "Male", "Female", "Male", "Female", "Male", "Female", "Male", "Female", "Male", "Female"],
        "ethnicity" => ["Caucasian", "African American", "Caucasian", "Hispanic", "Caucasian", "Asian", "Caucasian", "Caucasian", "Hispanic", "Caucasian", "African American", "Caucasian"],
        "apacheadmissiondx" => [
            "Hemorrhage/hematoma, intracranial",
            "Subarachnoid hemorrhage/intracranial aneurysm",
            "Hemorrhage/hematoma, intracranial",
            "Hemorrhage/hematoma, intracranial",
            "Hemorrhage/hematoma, intracranial",
            "Subdural hematoma, surgery for",
            "Subdural hematoma",
            "Epidural hematoma",
            "Subarachnoid hemorrhage/arteriovenous malformation",
            "Hemorrhage/hematoma, intracranial",
            "Subarachnoid hemorrhage/intracranial aneurysm",
            "Hemorrhage/hematoma, intracranial",
        ],
        "unitdischargeoffset" => [5000i64, 3000, 2000, 4000, 100, 6000, 7000, 8000, 2400, 3600, 4800, 2500],
        "hospitaldischargeoffset" => [9000i64, 7000, 6000, 8000, 400, 10000, 11000, 12000, 6400, 7600, 8800, 6500],
        "unittype" => ["Neuro ICU", "Neuro ICU", "MICU", "Neuro ICU", "MICU", "Neuro ICU", "Neuro ICU", "MICU", "Neuro ICU", "Neuro ICU", "MICU", "Neuro ICU"],
        "unitadmitsource" => ["Emergency Department", "Floor", "Emergency Department", "Floor", "Emergency Department", "Operating Room", "Floor", "Emergency Department", "Floor", "Emergency Department", "Floor", "Emergency Department"],
        "admissionweight" => [80.0f64, 70.0, 75.0, 60.0, 90.0, 85.0, 30.0, 100.0, 65.0, 72.0, 88.0, 95.0],
        "admissionheight" => [170.0f64, 165.0, 180.0, 175.0, 160.0, 172.0, 168.0, 300.0, 158.0, 177.0, 182.0, 169.0],
        "eyes" => [4i32, 3, 4, 4, 2, 3, 4, 1, 3, 4, 2, 4],
        "motor" => [6i32, 5, 6, 6, 4, 5, 6, 3, 5, 6, 4, 6],
        "verbal" => [5i32, 4, 5, 5, 2, 4, 5, 1, 4, 5, 3, 5],
        "diabetes" => [0i32, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0],
        "cirrhosis" => [0i32, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0],
        "apachescore" => [45i64, 62, 50, 40, 88, 55, 47, 95, 58, 42, 71, 49],
        "predictedhospitalmortality" => [0.12f64, 0.35, 0.18, 0.08, 0.72, 0.25, 0.15, 0.81, 0.28, 0.10, 0.44, 0.16],
        "hospitaldischargestatus" => ["Alive", "Expired", "Alive", "Alive", "Expired", "Alive", "Alive", "Expired", "Alive", "Alive", "Expired", "Alive"],
    }
    .unwrap()
}

/// First-day feature fixture: stays 1-11 plus an orphan stay 99.
///
/// The inner join against [`create_cohort_frame`] drops stay 12 (no features)
/// and stay 99 (not in the base cohort). Lab minimums for stay 9 carry the
/// `-1` sentinel.
pub fn create_features_frame() -> DataFrame {
    df! {
        "patientunitstayid" => [1i64, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 99],
        "heartrate_mean" => [82.0f64, 95.0, 78.0, 101.0, 118.0, 88.0, 76.0, 122.0, 90.0, 84.0, 97.0, 80.0],
        "respiratoryrate_mean" => [16.0f64, 18.0, 15.0, 20.0, 26.0, 17.0, 14.0, 28.0, 19.0, 16.0, 21.0, 15.0],
        "spo2_mean" => [97.0f64, 96.0, 98.0, 95.0, 91.0, 97.0, 98.0, 89.0, 96.0, 97.0, 94.0, 98.0],
        "temperature_mean" => [36.8f64, 37.1, 36.6, 37.4, 38.2, 36.9, 36.7, 38.6, 37.0, 36.8, 37.3, 36.5],
        "systolic_periodic_mean" => [132.0f64, 145.0, 128.0, 150.0, 160.0, 138.0, 126.0, 165.0, 142.0, 130.0, 148.0, 125.0],
        "diastolic_periodic_mean" => [78.0f64, 85.0, 75.0, 88.0, 95.0, 80.0, 74.0, 98.0, 84.0, 76.0, 87.0, 72.0],
        "map_periodic_mean" => [96.0f64, 105.0, 93.0, 109.0, 117.0, 99.0, 91.0, 120.0, 103.0, 94.0, 107.0, 90.0],
        "systolic_aperiodic_mean" => [130.0f64, 143.0, 126.0, 148.0, 158.0, 136.0, 124.0, 163.0, 140.0, 128.0, 146.0, 123.0],
        "diastolic_aperiodic_mean" => [76.0f64, 83.0, 73.0, 86.0, 93.0, 78.0, 72.0, 96.0, 82.0, 74.0, 85.0, 70.0],
        "map_aperiodic_mean" => [94.0f64, 103.0, 91.0, 107.0, 115.0, 97.0, 89.0, 118.0, 101.0, 92.0, 105.0, 88.0],
        "shock_index" => [0.63f64, 0.66, 0.62, 0.68, 0.75, 0.65, 0.61, 0.75, 0.64, 0.66, 0.66, 0.65],
        "sodium_min" => [Some(138.0f64), Some(128.0), Some(140.0), Some(136.0), Some(133.0), Some(139.0), Some(137.0), Some(131.0), Some(-1.0), Some(130.0), Some(141.0), Some(138.0)],
        "sodium_max" => [Some(142.0f64), Some(150.0), Some(144.0), Some(145.0), Some(152.0), Some(143.0), Some(146.0), Some(149.0), Some(148.0), Some(150.0), Some(147.0), Some(142.0)],
        "wbc_min" => [Some(6.0f64), Some(1.5), Some(7.0), Some(5.0), Some(4.0), Some(8.0), Some(6.5), Some(1.8), Some(-1.0), Some(5.0), Some(7.5), Some(6.0)],
        "wbc_max" => [Some(11.0f64), Some(14.0), Some(12.0), Some(14.0), Some(18.0), Some(13.0), Some(10.0), Some(19.0), Some(12.0), Some(14.0), Some(15.0), Some(11.0)],
        "bicarbonate_min" => [Some(24.0f64), Some(18.0), Some(25.0), Some(22.0), Some(15.0), Some(23.0), Some(26.0), Some(14.0), None, Some(21.0), Some(20.0), Some(24.0)],
        "bicarbonate_max" => [Some(27.0f64), Some(24.0), Some(28.0), Some(26.0), Some(21.0), Some(27.0), Some(29.0), Some(20.0), None, Some(25.0), Some(26.0), Some(27.0)],
        "creatinine_min" => [Some(0.8f64), Some(1.1), Some(0.7), Some(0.9), Some(1.6), Some(0.8), Some(0.7), Some(2.1), Some(0.9), Some(0.8), Some(1.2), Some(0.8)],
        "creatinine_max" => [Some(1.0f64), Some(1.5), Some(0.9), Some(1.2), Some(2.4), Some(1.0), Some(0.9), Some(3.0), Some(1.1), Some(1.0), Some(1.7), Some(1.0)],
        "antibiotic" => [1i32, 1, 0, 1, 1, 0, 0, 1, 1, 0, 1, 0],
        "vasopressor" => [0i32, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0],
        "sedative" => [1i32, 1, 0, 1, 1, 1, 0, 1, 1, 0, 1, 1],
    }
    .unwrap()
}

/// The four-analyte reduction policy matching the lab columns in
/// [`create_features_frame`].
pub fn fixture_policy() -> ichprep::pipeline::ReductionPolicy {
    use ichprep::pipeline::{AnalytePolicy, ReductionPolicy, ReductionRule};

    ReductionPolicy {
        entries: vec![
            AnalytePolicy {
                analyte: "sodium".to_string(),
                rule: ReductionRule::Deviation {
                    lower: 135.0,
                    upper: 145.0,
                },
            },
            AnalytePolicy {
                analyte: "wbc".to_string(),
                rule: ReductionRule::LowThreshold { cutoff: 2.0 },
            },
            AnalytePolicy {
                analyte: "bicarbonate".to_string(),
                rule: ReductionRule::KeepMin,
            },
            AnalytePolicy {
                analyte: "creatinine".to_string(),
                rule: ReductionRule::KeepMax,
            },
        ],
    }
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}
