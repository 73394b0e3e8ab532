//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output
//! - Fixed-width progress lines and the display sink they go to
//! - Statistics reporting

pub mod console;
pub mod progress;
pub mod stats;

pub use self::console::{
    print_batch_summary, print_error, print_success, print_warning, ConsoleDisplay,
};
pub use progress::{
    format_percentage, job_label, render, render_complete, ProgressDisplay, DEFAULT_LINE_WIDTH,
};
pub use stats::print_batch_stats;
