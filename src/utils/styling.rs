//! Terminal styling utilities

use console::{style, Emoji};
use std::path::Path;
use std::time::Duration;

// Emoji icons with fallbacks for terminals that don't support them
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static DICE: Emoji<'_, '_> = Emoji("🎲 ", "");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {}",
        style("ICHPREP · intracranial hemorrhage cohort preparation")
            .cyan()
            .bold()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(54)).dim());
    println!();
}

/// Print the run configuration card
pub fn print_config(
    cohort: &Path,
    features: &Path,
    output_dir: &Path,
    seed: u64,
    train_fraction: f64,
) {
    println!(
        "    {} Cohort:    {}",
        FOLDER,
        style(cohort.display()).white()
    );
    println!(
        "    {} Features:  {}",
        FOLDER,
        style(features.display()).white()
    );
    println!(
        "    {} Output:    {}",
        SAVE,
        style(output_dir.display()).white()
    );
    println!(
        "    {} Split:     {} train, seed {}",
        DICE,
        style(format!("{:.0}%", train_fraction * 100.0)).yellow(),
        style(seed).yellow()
    );
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize) {
    println!("      {} {}", style(count).yellow().bold(), description);
}

/// Print the elapsed time for a step
pub fn print_step_time(elapsed: Duration) {
    println!(
        "    {}",
        style(format!("({:.2}s)", elapsed.as_secs_f64())).dim()
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Cohort preparation complete!").green().bold()
    );
    println!();
}
