//! Fixed-width progress lines.
//!
//! A line looks like
//!
//! ```text
//! [ 02 / 10 ] InstallAssistant.pkg...... [ 512.00 kB /   1.00 MB (51.20%) ]
//! ```
//!
//! and is always exactly the configured width, so an in-progress line can be
//! overwritten in place by the next one.

use console::{measure_text_width, truncate_str};
use indicatif::DecimalBytes;

/// Default total width of a progress line.
pub const DEFAULT_LINE_WIDTH: usize = 80;

/// Padding character between label and stats.
const FILL: char = '.';

/// Column width reserved for each byte count ("999.99 MB").
const BYTES_COLUMN: usize = 9;

/// Column width of the percentage ("100.0%", "42.37%").
const PERCENT_COLUMN: usize = 6;

const COMPLETE: &str = "100.0%";

/// Render a progress line of exactly `width` columns.
///
/// Labels too long to leave room for at least one fill character are
/// truncated with an ellipsis.
pub fn render(label: &str, current: u64, total: u64, width: usize) -> String {
    layout(label, current, total, &format_percentage(current, total), width)
}

/// Render the closing line of a finished job: `bytes` of `bytes`, always `100.0%`.
///
/// Unlike [`render`], an empty payload still reads as complete.
pub fn render_complete(label: &str, bytes: u64, width: usize) -> String {
    layout(label, bytes, bytes, COMPLETE, width)
}

fn layout(label: &str, current: u64, total: u64, percentage: &str, width: usize) -> String {
    let stats = format!(
        "[ {:>bw$} / {:>bw$} ({:>pw$}) ]",
        DecimalBytes(current).to_string(),
        DecimalBytes(total).to_string(),
        percentage,
        bw = BYTES_COLUMN,
        pw = PERCENT_COLUMN,
    );

    let max_label = width.saturating_sub(measure_text_width(&stats) + 2);
    let label = truncate_str(label, max_label, "…");
    let fill = width
        .saturating_sub(measure_text_width(&label) + 1 + measure_text_width(&stats))
        .max(1);

    format!("{}{} {}", label, FILL.to_string().repeat(fill), stats)
}

/// Format the completed fraction as a percentage.
///
/// Completion renders as `100.0%`; everything else uses two decimals and is
/// capped at `99.99%` so an unfinished job never reads as done.
pub fn format_percentage(current: u64, total: u64) -> String {
    if total == 0 {
        return "0.00%".to_string();
    }

    if current >= total {
        return COMPLETE.to_string();
    }

    let percentage = (current as f64 / total as f64 * 100.0).min(99.99);
    format!("{:.2}%", percentage)
}

/// Label for the job at zero-based `index` in a batch of `count`.
///
/// The position indicator is zero-padded to the width of `count`.
pub fn job_label(index: usize, count: usize, name: &str) -> String {
    let digits = count.to_string().len();
    format!(
        "[ {:0digits$} / {:0digits$} ] {}",
        index + 1,
        count,
        name,
        digits = digits
    )
}

/// Sink for operator-facing progress lines.
///
/// `replace_last_line` overwrites the previously displayed line in place;
/// otherwise the line starts a new one.
pub trait ProgressDisplay: Send + Sync {
    fn display(&self, line: &str, replace_last_line: bool);

    /// Terminate any pending line. Called once at the end of a batch.
    fn finish(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_two_decimals() {
        assert_eq!(format_percentage(512_000, 1_000_000), "51.20%");
        assert_eq!(format_percentage(423_700, 1_000_000), "42.37%");
        assert_eq!(format_percentage(0, 1_000_000), "0.00%");
    }

    #[test]
    fn test_percentage_complete() {
        assert_eq!(format_percentage(1_000_000, 1_000_000), "100.0%");
        assert_eq!(format_percentage(1_000_001, 1_000_000), "100.0%");
    }

    #[test]
    fn test_percentage_never_rounds_up_to_complete() {
        assert_eq!(format_percentage(999_999, 1_000_000), "99.99%");
    }

    #[test]
    fn test_percentage_unknown_total() {
        assert_eq!(format_percentage(12_345, 0), "0.00%");
    }

    #[test]
    fn test_render_contains_stats() {
        let line = render("Base.pkg", 512_000, 1_000_000, DEFAULT_LINE_WIDTH);
        assert!(line.starts_with("Base.pkg..."));
        assert!(line.ends_with("(51.20%) ]"));
        assert!(line.contains("1.00 MB"));
        assert!(line.contains(". [ "));
    }

    #[test]
    fn test_render_complete() {
        let line = render("Base.pkg", 1_000_000, 1_000_000, DEFAULT_LINE_WIDTH);
        assert!(line.ends_with("(100.0%) ]"));
    }

    #[test]
    fn test_render_complete_empty_payload() {
        let line = render_complete("Empty.pkg", 0, DEFAULT_LINE_WIDTH);
        assert!(line.ends_with("(100.0%) ]"));
        assert_eq!(measure_text_width(&line), DEFAULT_LINE_WIDTH);

        // In-flight lines with an unknown total stay at zero.
        assert!(render("Empty.pkg", 0, 0, DEFAULT_LINE_WIDTH).ends_with("( 0.00%) ]"));
    }

    #[test]
    fn test_render_complete_matches_render() {
        assert_eq!(
            render_complete("Base.pkg", 1_000_000, 100),
            render("Base.pkg", 1_000_000, 1_000_000, 100)
        );
    }

    #[test]
    fn test_render_width_is_constant() {
        for width in [60, 80, 120] {
            for len in [0, 1, 10, 20] {
                let label = "x".repeat(len);
                for (current, total) in [(0, 0), (512_000, 1_000_000), (5, 5), (12_300_000_000, 12_300_000_000)] {
                    let line = render(&label, current, total, width);
                    assert_eq!(measure_text_width(&line), width, "line: {line:?}");
                }
            }
        }
    }

    #[test]
    fn test_render_truncates_long_labels() {
        let label = "y".repeat(200);
        let line = render(&label, 1, 2, DEFAULT_LINE_WIDTH);
        assert_eq!(measure_text_width(&line), DEFAULT_LINE_WIDTH);
        assert!(line.contains("…. ["));
    }

    #[test]
    fn test_job_label_padding() {
        assert_eq!(job_label(1, 10, "Base.pkg"), "[ 02 / 10 ] Base.pkg");
        assert_eq!(job_label(0, 3, "a.dist"), "[ 1 / 3 ] a.dist");
        assert_eq!(job_label(99, 100, "z.pkg"), "[ 100 / 100 ] z.pkg");
    }
}
