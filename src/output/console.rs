//! Console output utilities.

use std::io::Write;
use std::sync::Mutex;

use console::{style, Term};

use crate::output::progress::ProgressDisplay;

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the batch header.
pub fn print_batch_summary(count: usize, destination: &str) {
    println!();
    println!("{}", style("Download:").bold());
    println!("  Files:       {}", count);
    println!("  Destination: {}", destination);
    println!();
}

/// Progress lines on stdout.
///
/// With ANSI enabled a replacement moves the cursor up and clears the previous
/// line. Without it the line is redrawn after a carriage return, which leaves
/// the current line unterminated until the next new line or [`finish`].
///
/// [`finish`]: ProgressDisplay::finish
pub struct ConsoleDisplay {
    term: Term,
    ansi: bool,
    // Plain mode only: the last line written has no trailing newline yet.
    pending: Mutex<bool>,
}

impl ConsoleDisplay {
    pub fn new(ansi: bool) -> Self {
        Self {
            term: Term::stdout(),
            ansi,
            pending: Mutex::new(false),
        }
    }

    fn display_ansi(&self, line: &str, replace_last_line: bool) -> std::io::Result<()> {
        if replace_last_line {
            self.term.clear_last_lines(1)?;
        }
        self.term.write_line(line)
    }

    fn display_plain(&self, line: &str, replace_last_line: bool) -> std::io::Result<()> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        let mut out = std::io::stdout().lock();

        if replace_last_line {
            write!(out, "\r{}", line)?;
        } else {
            if *pending {
                writeln!(out)?;
            }
            write!(out, "{}", line)?;
        }
        *pending = true;
        out.flush()
    }
}

impl ProgressDisplay for ConsoleDisplay {
    fn display(&self, line: &str, replace_last_line: bool) {
        let result = if self.ansi {
            self.display_ansi(line, replace_last_line)
        } else {
            self.display_plain(line, replace_last_line)
        };

        if let Err(e) = result {
            tracing::debug!("Failed to write progress line: {}", e);
        }
    }

    fn finish(&self) {
        if self.ansi {
            return;
        }

        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if *pending {
            println!();
            *pending = false;
        }
    }
}
