//! Single-use completion signal between a transport and the sequencer.

use std::sync::Mutex;

use tokio::sync::oneshot;

/// Signalling half, held by the job's event handler.
///
/// Only the first [`signal`](CompletionGate::signal) releases the waiter;
/// later calls are no-ops. The oneshot channel gives release/acquire ordering,
/// so anything written before `signal` is visible to the waiter after
/// [`GateWaiter::wait`] returns.
#[derive(Debug)]
pub struct CompletionGate {
    sender: Mutex<Option<oneshot::Sender<()>>>,
}

/// Waiting half, held by the sequencer.
#[derive(Debug)]
pub struct GateWaiter {
    receiver: oneshot::Receiver<()>,
}

/// The gate was dropped without ever being signalled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateAbandoned;

impl CompletionGate {
    pub fn new() -> (Self, GateWaiter) {
        let (sender, receiver) = oneshot::channel();
        (
            Self {
                sender: Mutex::new(Some(sender)),
            },
            GateWaiter { receiver },
        )
    }

    /// Release the waiter. Returns `true` only for the call that did so.
    pub fn signal(&self) -> bool {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();

        match sender {
            // The waiter may be gone already; the gate still counts as signalled.
            Some(sender) => {
                let _ = sender.send(());
                true
            }
            None => false,
        }
    }

    pub fn is_signaled(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_none()
    }
}

impl GateWaiter {
    /// Suspend until the gate is signalled.
    pub async fn wait(self) -> Result<(), GateAbandoned> {
        self.receiver.await.map_err(|_| GateAbandoned)
    }
}
