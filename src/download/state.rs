//! Per-job download state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::error::Error;

/// Progress and outcome of one job.
///
/// Written by the transport's notification context and read by the
/// sequencer. The sequencer reads only after the job's
/// [`CompletionGate`](crate::download::CompletionGate) has fired; new reads
/// must keep to that rule or they will observe a job mid-flight. A fresh state
/// is used for every job so late events from a finished job cannot touch the
/// next one.
#[derive(Debug, Default)]
pub struct JobState {
    bytes_transferred: AtomicU64,
    bytes_expected: AtomicU64,
    terminal_error: Mutex<Option<Error>>,
}

impl JobState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a progress report. Counters never move backwards.
    ///
    /// Returns the counters after the update.
    pub fn record_progress(&self, bytes_written: u64, bytes_expected: u64) -> (u64, u64) {
        let transferred = self
            .bytes_transferred
            .fetch_max(bytes_written, Ordering::AcqRel)
            .max(bytes_written);
        let expected = self
            .bytes_expected
            .fetch_max(bytes_expected, Ordering::AcqRel)
            .max(bytes_expected);
        (transferred, expected)
    }

    /// Set the expected size if nothing reported one yet.
    pub fn settle_expected(&self, size: u64) -> u64 {
        match self
            .bytes_expected
            .compare_exchange(0, size, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => size,
            Err(known) => known,
        }
    }

    pub fn bytes_transferred(&self) -> u64 {
        self.bytes_transferred.load(Ordering::Acquire)
    }

    /// Expected total size, 0 when unknown.
    pub fn bytes_expected(&self) -> u64 {
        self.bytes_expected.load(Ordering::Acquire)
    }

    /// Record a terminal error. The first error wins.
    ///
    /// Returns `false` if an error was already recorded.
    pub fn fail(&self, error: Error) -> bool {
        let mut slot = self
            .terminal_error
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        if slot.is_some() {
            tracing::debug!("Ignoring secondary error: {}", error);
            return false;
        }
        *slot = Some(error);
        true
    }

    pub fn has_failed(&self) -> bool {
        self.terminal_error
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Take the terminal error, leaving none behind.
    pub fn take_error(&self) -> Option<Error> {
        self.terminal_error
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_zeroed() {
        let state = JobState::new();
        assert_eq!(state.bytes_transferred(), 0);
        assert_eq!(state.bytes_expected(), 0);
        assert!(!state.has_failed());
    }

    #[test]
    fn test_progress_is_monotonic() {
        let state = JobState::new();
        assert_eq!(state.record_progress(300, 1000), (300, 1000));
        assert_eq!(state.record_progress(200, 1000), (300, 1000));
        assert_eq!(state.record_progress(400, 1000), (400, 1000));
        assert_eq!(state.bytes_transferred(), 400);
    }

    #[test]
    fn test_unknown_expected_does_not_clear_known() {
        let state = JobState::new();
        state.record_progress(10, 1000);
        assert_eq!(state.record_progress(20, 0), (20, 1000));
    }

    #[test]
    fn test_settle_expected_only_when_unknown() {
        let state = JobState::new();
        assert_eq!(state.settle_expected(500), 500);
        assert_eq!(state.settle_expected(900), 500);

        let known = JobState::new();
        known.record_progress(0, 1000);
        assert_eq!(known.settle_expected(42), 1000);
    }

    #[test]
    fn test_first_error_wins() {
        let state = JobState::new();
        assert!(state.fail(Error::InvalidUrl("first".into())));
        assert!(!state.fail(Error::EmptyBatch));

        match state.take_error() {
            Some(Error::InvalidUrl(locator)) => assert_eq!(locator, "first"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(state.take_error().is_none());
    }

    #[test]
    fn test_concurrent_progress_keeps_maximum() {
        let state = std::sync::Arc::new(JobState::new());
        let handles: Vec<_> = (1..=16u64)
            .map(|i| {
                let state = std::sync::Arc::clone(&state);
                std::thread::spawn(move || {
                    state.record_progress(i * 100, 1600);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(state.bytes_transferred(), 1600);
    }
}
