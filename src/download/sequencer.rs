//! Strictly sequential batch execution.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::download::batch::{parse_locator, Batch, BatchReport, DownloadedFile};
use crate::download::gate::CompletionGate;
use crate::download::handler::JobHandler;
use crate::download::state::JobState;
use crate::error::{Error, Result};
use crate::fs::{destination_path, ensure_dir};
use crate::output::{job_label, render, render_complete, ProgressDisplay, DEFAULT_LINE_WIDTH};
use crate::transport::Transport;

/// Runs the jobs of a batch one at a time, in order.
///
/// Only one job is ever in flight: the next is submitted after the previous
/// job's gate has fired and its state showed success. The first failure ends
/// the batch; files already delivered stay where they are.
pub struct JobSequencer<T> {
    transport: T,
    destination_dir: PathBuf,
    display: Option<Arc<dyn ProgressDisplay>>,
    quiet: bool,
    line_width: usize,
}

impl<T: Transport> JobSequencer<T> {
    pub fn new(transport: T, destination_dir: impl Into<PathBuf>) -> Self {
        Self {
            transport,
            destination_dir: destination_dir.into(),
            display: None,
            quiet: false,
            line_width: DEFAULT_LINE_WIDTH,
        }
    }

    /// Where progress lines go. Without a display nothing is shown.
    pub fn with_display(mut self, display: Arc<dyn ProgressDisplay>) -> Self {
        self.display = Some(display);
        self
    }

    /// Suppress all progress lines. Jobs and errors are unaffected.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn line_width(mut self, width: usize) -> Self {
        self.line_width = width;
        self
    }

    pub fn destination_dir(&self) -> &Path {
        &self.destination_dir
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn active_display(&self) -> Option<Arc<dyn ProgressDisplay>> {
        if self.quiet {
            None
        } else {
            self.display.clone()
        }
    }

    /// Download every locator of `batch` into the destination directory.
    pub async fn run_batch(&self, batch: &Batch) -> Result<BatchReport> {
        if batch.is_empty() {
            return Err(Error::EmptyBatch);
        }

        let display = self.active_display();
        let started = Instant::now();
        let mut report = BatchReport::default();

        for (index, locator) in batch.locators().iter().enumerate() {
            let result = self
                .run_job(index, batch.len(), locator, display.as_ref())
                .await;

            match result {
                Ok(file) => report.files.push(file),
                Err(e) => {
                    if let Some(display) = &display {
                        display.finish();
                    }
                    tracing::warn!(
                        "Batch aborted at job {} of {}: {}",
                        index + 1,
                        batch.len(),
                        e
                    );
                    return Err(e);
                }
            }
        }

        if let Some(display) = &display {
            display.finish();
        }

        report.elapsed = started.elapsed();
        tracing::debug!(
            "Downloaded {} file(s), {} bytes, to {}",
            report.files.len(),
            report.total_bytes(),
            self.destination_dir.display()
        );

        Ok(report)
    }

    async fn run_job(
        &self,
        index: usize,
        count: usize,
        locator: &str,
        display: Option<&Arc<dyn ProgressDisplay>>,
    ) -> Result<DownloadedFile> {
        let url = parse_locator(locator)?;
        let destination = destination_path(&self.destination_dir, &url)
            .map_err(|_| Error::InvalidUrl(locator.to_string()))?;

        // Created lazily so a bad locator is reported before any filesystem error.
        ensure_dir(&self.destination_dir).map_err(|e| match e {
            Error::Io(source) => Error::Filesystem {
                path: self.destination_dir.clone(),
                source,
            },
            other => other,
        })?;

        let name = destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let label = job_label(index, count, &name);

        if let Some(display) = display {
            display.display(&render(&label, 0, 0, self.line_width), false);
        }

        let state = Arc::new(JobState::new());
        let (gate, waiter) = CompletionGate::new();
        let handler = JobHandler::new(
            locator.to_string(),
            label.clone(),
            destination.clone(),
            Arc::clone(&state),
            gate,
        )
        .with_display(display.cloned(), self.line_width);

        tracing::debug!("Downloading {} -> {}", url, destination.display());
        self.transport.submit(&url, Arc::new(handler));

        if waiter.wait().await.is_err() {
            state.fail(Error::Transport {
                locator: locator.to_string(),
                message: "transfer ended without completing".to_string(),
            });
        }

        // The gate has fired: the transport side no longer writes to `state`.
        if let Some(error) = state.take_error() {
            return Err(error);
        }

        let size = state.bytes_expected();
        if let Some(display) = display {
            display.display(&render_complete(&label, size, self.line_width), true);
        }

        Ok(DownloadedFile {
            locator: locator.to_string(),
            path: destination,
            bytes: size,
        })
    }
}
