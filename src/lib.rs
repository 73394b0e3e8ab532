//! pkgfetch - sequential installer package downloader
//!
//! Fetches a batch of remote artifacts (packages plus their distribution
//! manifest) one at a time, in order, drawing a live fixed-width progress
//! line for each and stopping at the first failure with a single typed error.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use pkgfetch::{Batch, ConsoleDisplay, HttpTransport, JobSequencer};
//!
//! #[tokio::main]
//! async fn main() -> pkgfetch::Result<()> {
//!     let transport = HttpTransport::new(
//!         "pkgfetch/0.1.0",
//!         Duration::from_secs(30),
//!         std::env::temp_dir(),
//!     )?;
//!     let sequencer = JobSequencer::new(transport, "/tmp/installer")
//!         .with_display(Arc::new(ConsoleDisplay::new(true)));
//!
//!     let batch = Batch::for_packages(
//!         "https://swcdn.example.com/042-12345.English.dist",
//!         ["https://swcdn.example.com/InstallAssistant.pkg"],
//!     );
//!     let report = sequencer.run_batch(&batch).await?;
//!     println!("{} files", report.files.len());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod output;
pub mod transport;

// Re-exports for convenience
pub use config::Config;
pub use download::{Batch, BatchReport, CompletionGate, JobSequencer, JobState};
pub use error::{Error, Result};
pub use output::{ConsoleDisplay, ProgressDisplay};
pub use transport::{EventHandler, HttpTransport, Transport};
