//! Ichprep: ICH Cohort Preparation Library
//!
//! A library for extracting and preparing an intracranial-hemorrhage
//! critical-care cohort: join, filter, abnormal-value reduction, feature
//! curation, and a reproducible stratified train/test split.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
