//! Transport layer: the asynchronous engine that actually moves bytes.
//!
//! A [`Transport`] starts a download in the background and reports back
//! through an [`EventHandler`]. Implementations must honour this ordering:
//!
//! - any number of [`EventHandler::on_progress`] calls,
//! - then at most one [`EventHandler::on_data_ready`] once the payload sits in
//!   a transport-owned temporary file,
//! - then exactly one [`EventHandler::on_complete`], always last.

use std::path::Path;
use std::sync::Arc;

use url::Url;

pub mod http;
pub mod throttle;

#[cfg(test)]
pub mod scripted;

pub use http::HttpTransport;
pub use throttle::ProgressThrottle;

/// HTTP status a download must resolve to.
pub const SUCCESS_STATUS: u16 = 200;

/// Terminal outcome of a transfer: the final response status, or the
/// transport error message.
pub type Completion = std::result::Result<u16, String>;

/// Receiver of transport notifications for one job.
pub trait EventHandler: Send + Sync {
    /// Bytes written so far and the expected total (0 when unknown).
    fn on_progress(&self, bytes_written: u64, bytes_expected: u64);

    /// The full payload is at `location`. The handler may move it away.
    fn on_data_ready(&self, location: &Path, status: u16);

    /// The transfer is over.
    fn on_complete(&self, completion: Completion);
}

/// Asynchronous download engine.
pub trait Transport: Send + Sync {
    /// Start fetching `url`. Returns immediately; events go to `handler`.
    fn submit(&self, url: &Url, handler: Arc<dyn EventHandler>);
}
