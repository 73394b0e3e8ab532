//! Job-local event sink.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::download::gate::CompletionGate;
use crate::download::state::JobState;
use crate::error::Error;
use crate::fs::relocate;
use crate::output::{render, ProgressDisplay};
use crate::transport::{Completion, EventHandler, SUCCESS_STATUS};

/// Consumes one job's transport events.
///
/// Updates the job state, redraws the progress line, moves the finished file
/// into place and releases the gate on the first terminal outcome. Events
/// after that are ignored.
pub struct JobHandler {
    locator: String,
    label: String,
    destination: PathBuf,
    state: Arc<JobState>,
    gate: CompletionGate,
    delivered: AtomicBool,
    display: Option<Arc<dyn ProgressDisplay>>,
    line_width: usize,
}

impl JobHandler {
    pub fn new(
        locator: String,
        label: String,
        destination: PathBuf,
        state: Arc<JobState>,
        gate: CompletionGate,
    ) -> Self {
        Self {
            locator,
            label,
            destination,
            state,
            gate,
            delivered: AtomicBool::new(false),
            display: None,
            line_width: crate::output::DEFAULT_LINE_WIDTH,
        }
    }

    pub fn with_display(
        mut self,
        display: Option<Arc<dyn ProgressDisplay>>,
        line_width: usize,
    ) -> Self {
        self.display = display;
        self.line_width = line_width;
        self
    }

    /// Record a terminal error and release the gate.
    fn finish_with(&self, error: Error) {
        tracing::debug!("{}", error);
        self.state.fail(error);
        self.gate.signal();
    }

    fn finish_data(&self, location: &Path) -> std::io::Result<()> {
        let size = std::fs::metadata(location)?.len();
        self.state.settle_expected(size);
        self.state.record_progress(size, 0);
        relocate(location, &self.destination)
    }
}

impl EventHandler for JobHandler {
    fn on_progress(&self, bytes_written: u64, bytes_expected: u64) {
        if self.gate.is_signaled() {
            return;
        }

        let (current, total) = self.state.record_progress(bytes_written, bytes_expected);
        if let Some(display) = &self.display {
            display.display(&render(&self.label, current, total, self.line_width), true);
        }
    }

    fn on_data_ready(&self, location: &Path, status: u16) {
        if self.gate.is_signaled() {
            return;
        }

        // An error body never reaches the destination; completion classifies it.
        if status != SUCCESS_STATUS {
            tracing::debug!(
                "Not keeping HTTP {} response body for {}",
                status,
                self.locator
            );
            return;
        }

        match self.finish_data(location) {
            Ok(()) => {
                self.delivered.store(true, Ordering::Release);
                tracing::debug!("Saved {}", self.destination.display());
            }
            Err(source) => self.finish_with(Error::Filesystem {
                path: self.destination.clone(),
                source,
            }),
        }
    }

    fn on_complete(&self, completion: Completion) {
        match completion {
            Err(message) => {
                tracing::debug!("Transport error for {}: {}", self.locator, message);
                self.state.fail(Error::Transport {
                    locator: self.locator.clone(),
                    message,
                });
            }
            Ok(status) if status != SUCCESS_STATUS => {
                self.state.fail(Error::UnexpectedResponse {
                    locator: self.locator.clone(),
                    status,
                });
            }
            Ok(_) if !self.state.has_failed() && !self.delivered.load(Ordering::Acquire) => {
                self.state.fail(Error::Transport {
                    locator: self.locator.clone(),
                    message: "transfer completed without delivering data".to_string(),
                });
            }
            Ok(_) => {}
        }

        if !self.gate.signal() {
            tracing::debug!("Late completion for {} ignored", self.locator);
        }
    }
}
