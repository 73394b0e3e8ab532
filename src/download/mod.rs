//! Download module: turns an event-driven transport into ordered, checked
//! file retrieval.
//!
//! This module provides:
//! - Batches and their reports
//! - The single-use completion gate
//! - Per-job state shared with the transport
//! - The job-local event handler
//! - The sequential batch runner

pub mod batch;
pub mod gate;
pub mod handler;
pub mod sequencer;
pub mod state;

pub use batch::{parse_locator, Batch, BatchReport, DownloadedFile};
pub use gate::{CompletionGate, GateAbandoned, GateWaiter};
pub use handler::JobHandler;
pub use sequencer::JobSequencer;
pub use state::JobState;
