//! Cohort preparation summary display

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::FilterTrace;

/// Summary of one preparation run, displayed after the artifacts are written.
#[derive(Debug, Default)]
pub struct CohortSummary {
    pub rows_loaded: usize,
    pub cols_loaded: usize,
    pub filter_trace: FilterTrace,
    pub analytes_reduced: usize,
    pub columns_dropped: usize,
    pub final_rows: usize,
    pub final_cols: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub train_prevalence: f64,
    pub test_prevalence: f64,
}

impl CohortSummary {
    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("▣").cyan(),
            style("COHORT SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("Joined rows"),
            Cell::new(format!("{} × {}", self.rows_loaded, self.cols_loaded)),
        ]);
        table.add_row(vec![
            Cell::new("After filtering"),
            Cell::new(self.filter_trace.final_rows().unwrap_or(0)),
        ]);
        table.add_row(vec![
            Cell::new("Analytes reduced"),
            Cell::new(self.analytes_reduced),
        ]);
        table.add_row(vec![
            Cell::new("Columns dropped"),
            Cell::new(self.columns_dropped).fg(if self.columns_dropped == 0 {
                Color::White
            } else {
                Color::Red
            }),
        ]);
        table.add_row(vec![
            Cell::new("Final cohort"),
            Cell::new(format!("{} × {}", self.final_rows, self.final_cols))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("Train / test rows"),
            Cell::new(format!("{} / {}", self.train_rows, self.test_rows)),
        ]);
        table.add_row(vec![
            Cell::new("Mortality prevalence"),
            Cell::new(format!(
                "train {:.1}% · test {:.1}%",
                self.train_prevalence * 100.0,
                self.test_prevalence * 100.0
            )),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.filter_trace.steps.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("▤").cyan(),
                style("FILTER TRACE").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());
            for step in &self.filter_trace.steps {
                println!(
                    "      {} {:<28} {}",
                    style("•").dim(),
                    step.name,
                    style(step.rows).yellow()
                );
            }
        }
    }
}
