//! Progress throttling.
//!
//! Network reads arrive in small chunks; redrawing the progress line for each
//! one would dominate the transfer. The transport only forwards a progress
//! event when the interval has elapsed.

use std::time::{Duration, Instant};

/// Rate-limiter for progress events.
pub struct ProgressThrottle {
    last_emit: Option<Instant>,
    min_interval: Duration,
}

impl ProgressThrottle {
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            last_emit: None,
            min_interval,
        }
    }

    /// Check if enough time has passed to emit another progress event.
    pub fn should_emit(&mut self) -> bool {
        let now = Instant::now();
        match self.last_emit {
            Some(last) if now.duration_since(last) < self.min_interval => false,
            _ => {
                self.last_emit = Some(now);
                true
            }
        }
    }
}
