//! Quench Tutorials
//!
//! Small programs that walk through encoding constraint problems as energy
//! models, sampling them and checking the answers:
//!
//! - **NOT and AND gates**: hand-written QUBO dictionaries
//! - **Full adder**: a circuit stitched together from gate constraints
//! - **2 by 2 multiplier**: factoring by pinning the product bits
//! - **Four queens**: `AnyOf` and `NotBoth` constraints on a board
//! - **Coin flips**: unbiased variables and sampler timing
//! - **Anneal schedules**: the same model under three schedules
//!
//! Every tutorial goes through [`runners::Pipeline`]:
//!
//! ```ignore
//! use quench_demos::config::DemoArgs;
//! use quench_demos::problems::full_adder;
//! use quench_demos::runners::Pipeline;
//! use quench_ir::ReductionConfig;
//!
//! let constraints = full_adder()?;
//! let model = constraints.to_energy_model(&ReductionConfig::default())?;
//! let sampler = DemoArgs::default().build_sampler()?;
//! let outcome = Pipeline::new(30).run(sampler.as_ref(), &model, &constraints).await?;
//! println!("{} valid", outcome.report.valid_occurrences());
//! ```

pub mod config;
pub mod problems;
pub mod prompt;
pub mod runners;
pub mod tutorials;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use quench_hal::{SampleSet, Timing};
use quench_ir::AggregateReport;

/// Spinner shown while a sampler runs.
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}

/// Print a warning.
pub fn print_warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Print every record of a sample set, one per line.
pub fn print_records(samples: &SampleSet) {
    for record in samples {
        println!("  {record}");
    }
}

/// Print sampler timing. Unreported fields show as "not available".
pub fn print_timing(timing: Option<&Timing>) {
    let timing = timing.cloned().unwrap_or_default();
    for line in timing.to_string().lines() {
        println!("  {}", style(line).dim());
    }
}

/// Print the valid/invalid totals of a report.
pub fn print_totals(report: &AggregateReport) {
    println!(
        "  {} valid solutions, {} invalid solutions",
        style(report.valid_occurrences()).green().bold(),
        style(report.invalid_occurrences()).red()
    );
}
