//! Ichprep: ICH Cohort Preparation CLI
//!
//! One-shot batch job: join the two source views, filter, reduce paired lab
//! extremes, curate the feature matrix, and write a stratified train/test
//! split with a JSON provenance report.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use ichprep::cli::Cli;
use ichprep::pipeline::{
    apply_inclusion_criteria, apply_reduction, binarize_label, curate, join_cohort, load_table,
    missing_ratios, replace_sentinel_missing, stratified_split, write_csv, write_split_artifacts,
    CurationConfig, ReductionPolicy, SplitFrames, ALL_CANDIDATES_FILE, COHORT_FILE,
};
use ichprep::report::{write_run_report, CohortSummary, MissingEntry, RunReport, SplitOutcome};
use ichprep::utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config, print_count,
    print_info, print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        &cli.cohort,
        &cli.features,
        &cli.output_dir,
        cli.seed,
        cli.train_fraction,
    );

    std::fs::create_dir_all(&cli.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            cli.output_dir.display()
        )
    })?;

    let mut summary = CohortSummary::default();

    // Step 1: Load the two source views and inner-join them on stay id
    print_step_header(1, "Load & Join");
    let step_start = Instant::now();
    let spinner = create_spinner("Loading source tables...");
    let base = load_table(&cli.cohort, cli.infer_schema_length)?;
    let features = load_table(&cli.features, cli.infer_schema_length)?;
    let df = join_cohort(base, features)?;
    finish_with_success(&spinner, "Tables joined");

    let (rows, cols) = df.shape();
    summary.rows_loaded = rows;
    summary.cols_loaded = cols;
    println!("\n    {} Joined cohort:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    print_step_time(step_start.elapsed());

    // Step 2: Inclusion/exclusion filtering, checkpointed before reduction
    print_step_header(2, "Filter");
    let step_start = Instant::now();
    let (mut df, trace) = apply_inclusion_criteria(df)?;
    for step in &trace.steps {
        print_count(&format!("rows after: {}", step.name), step.rows);
    }
    print_success("Inclusion criteria applied");

    let candidates_path = cli.output_dir.join(ALL_CANDIDATES_FILE);
    write_csv(&mut df, &candidates_path, true)?;
    print_info(&format!("Checkpoint: {}", candidates_path.display()));
    summary.filter_trace = trace.clone();
    print_step_time(step_start.elapsed());

    // Step 3: Sentinel recoding, then abnormal-value reduction.
    // The sentinel pass must precede the reducer so -1 is never read as a
    // valid extreme by the deviation/threshold rules.
    print_step_header(3, "Abnormal-Value Reduction");
    let step_start = Instant::now();
    let df = replace_sentinel_missing(df)?;
    let missing = missing_ratios(&df)?;

    let policy = match &cli.policy {
        Some(path) => ReductionPolicy::from_json_file(path)?,
        None => ReductionPolicy::default(),
    };
    let df = apply_reduction(df, &policy)?;
    summary.analytes_reduced = policy.entries.len();
    print_count("lab analytes reduced to single features", policy.entries.len());
    print_success("Reduction complete");
    print_step_time(step_start.elapsed());

    // Step 4: Feature curation
    print_step_header(4, "Feature Curation");
    let step_start = Instant::now();
    let config = match &cli.curation {
        Some(path) => CurationConfig::from_json_file(path)?,
        None => CurationConfig::default(),
    };
    let (mut df, curation) = curate(df, &config)?;
    summary.columns_dropped =
        curation.dropped_superseded.len() + curation.dropped_not_significant.len();
    print_count("superseded columns dropped", curation.dropped_superseded.len());
    print_count(
        "not-significant columns dropped",
        curation.dropped_not_significant.len(),
    );

    let cohort_path = cli.output_dir.join(COHORT_FILE);
    write_csv(&mut df, &cohort_path, false)?;
    print_info(&format!("Checkpoint: {}", cohort_path.display()));

    let (final_rows, final_cols) = df.shape();
    summary.final_rows = final_rows;
    summary.final_cols = final_cols;
    print_success("Curation complete");
    print_step_time(step_start.elapsed());

    // Step 5: Stratified split and artifact persistence
    print_step_header(5, "Train/Test Split");
    let step_start = Instant::now();
    let df = binarize_label(df)?;
    let mut split = stratified_split(&df, cli.train_fraction, cli.seed)?;

    summary.train_rows = split.x_train.height();
    summary.test_rows = split.x_test.height();
    summary.train_prevalence = SplitFrames::prevalence(&split.y_train)?;
    summary.test_prevalence = SplitFrames::prevalence(&split.y_test)?;

    let artifact_paths = write_split_artifacts(&mut split, &cli.output_dir)?;
    for path in &artifact_paths {
        print_info(&format!("Wrote {}", path.display()));
    }
    print_success("Split artifacts written");
    print_step_time(step_start.elapsed());

    // Provenance report next to the artifacts
    let report = RunReport {
        metadata: RunReport::metadata(
            &cli.cohort,
            &cli.features,
            &cli.output_dir,
            cli.seed,
            cli.train_fraction,
        ),
        filter: trace,
        reduction_policy: policy,
        curation,
        missing: missing
            .into_iter()
            .map(|(column, ratio)| MissingEntry { column, ratio })
            .collect(),
        split: SplitOutcome {
            train_rows: summary.train_rows,
            test_rows: summary.test_rows,
            train_prevalence: summary.train_prevalence,
            test_prevalence: summary.test_prevalence,
        },
    };
    let report_path = cli.output_dir.join("run_report.json");
    write_run_report(&report, &report_path)?;
    print_info(&format!("Run report: {}", report_path.display()));

    summary.display();
    print_completion();

    Ok(())
}
