//! Report module - run summary display and JSON provenance report

mod run_report;
mod summary;

pub use run_report::*;
pub use summary::*;
