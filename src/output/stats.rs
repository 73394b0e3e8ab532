//! Statistics reporting.

use console::style;
use indicatif::{DecimalBytes, HumanDuration};

use crate::download::BatchReport;

/// Print statistics for a finished batch.
pub fn print_batch_stats(report: &BatchReport) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Batch Statistics:").bold());
    println!("  Files:   {}", report.files.len());
    println!("  Size:    {}", DecimalBytes(report.total_bytes()));
    println!("  Elapsed: {}", HumanDuration(report.elapsed));
    for file in &report.files {
        println!(
            "  {} ({})",
            style(file.path.display()).green(),
            DecimalBytes(file.bytes)
        );
    }
    println!("{}", style("═".repeat(50)).dim());
}
