//! Column vocabulary for the joined cohort table
//!
//! The source views (base cohort, first-day vitals/labs/treatments) are
//! defined upstream in SQL; this module pins the column names the pipeline
//! relies on so that every stage refers to one shared vocabulary.

/// Join key: one row per patient unit stay in both source views.
pub const STAY_ID: &str = "patientunitstayid";

/// Age column. Stored as text in the source because of the `"> 89"` placeholder.
pub const AGE: &str = "age";

/// Placeholder the source uses for patients older than 89 (de-identification).
pub const OVER_89_PLACEHOLDER: &str = "> 89";

/// Numeric substitute for the over-89 placeholder.
pub const OVER_89_AGE: f64 = 93.0;

/// Minimum age for inclusion.
pub const MIN_AGE: f64 = 18.0;

pub const UNIT_DISCHARGE_OFFSET: &str = "unitdischargeoffset";
pub const HOSPITAL_DISCHARGE_OFFSET: &str = "hospitaldischargeoffset";

/// Minimum unit length of stay, in minutes (4 hours).
pub const MIN_UNIT_STAY_MINUTES: f64 = 240.0;

pub const WEIGHT: &str = "admissionweight";
pub const HEIGHT: &str = "admissionheight";
pub const WEIGHT_RANGE: (f64, f64) = (50.0, 300.0);
pub const HEIGHT_RANGE: (f64, f64) = (50.0, 250.0);

/// Admission diagnosis category (fixed bleed-subtype vocabulary).
pub const ADMISSION_DX: &str = "apacheadmissiondx";

/// Non-surgical bleed subtypes retained after filtering.
/// The first entry is the reference category for one-hot encoding
/// (the most prevalent subtype in the cohort).
pub const DX_VOCABULARY: [&str; 5] = [
    "Hemorrhage/hematoma, intracranial",
    "Subarachnoid hemorrhage/intracranial aneurysm",
    "Subarachnoid hemorrhage/arteriovenous malformation",
    "Subdural hematoma",
    "Epidural hematoma",
];

/// Indicator column names for the non-reference subtypes, in vocabulary order.
pub const DX_INDICATORS: [&str; 4] = [
    "dx_sah_aneurysm",
    "dx_sah_avm",
    "dx_subdural_hematoma",
    "dx_epidural_hematoma",
];

/// Surgically managed bleed subtypes excluded from the cohort.
pub const DX_SURGICAL_EXCLUSIONS: [&str; 4] = [
    "Hemorrhage/hematoma-intracranial, surgery for",
    "Subarachnoid hemorrhage/intracranial aneurysm, surgery for",
    "Subdural hematoma, surgery for",
    "Epidural hematoma, surgery for",
];

/// Glasgow Coma Scale sub-scores, summed into [`GCS_TOTAL`] during curation.
pub const GCS_EYES: &str = "eyes";
pub const GCS_MOTOR: &str = "motor";
pub const GCS_VERBAL: &str = "verbal";
pub const GCS_TOTAL: &str = "gcs";

/// Outcome column in the source (`"Expired"` / `"Alive"`).
pub const DISCHARGE_STATUS: &str = "hospitaldischargestatus";
pub const EXPIRED: &str = "Expired";

/// Binarized outcome label produced by the split stage.
pub const LABEL: &str = "expired";

/// Benchmark severity prediction kept aside for model comparison.
pub const BENCHMARK: &str = "predictedhospitalmortality";
pub const APACHE_SCORE: &str = "apachescore";

/// Sentinel the source uses for "not recorded" in numeric columns.
pub const MISSING_SENTINEL: i64 = -1;
