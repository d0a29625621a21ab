//! Outbound queue / dispatch bridge
//!
//! FIFO of inputs waiting to be written to the socket. Producers (effect
//! execution in the runtime) enqueue without awaiting; the connection pump's
//! writer loop is the single consumer. Unbounded by design: exactly one
//! dialog is in flight per journey, so the queue never grows meaningfully.

use crate::protocol::Input;
use tokio::sync::mpsc;

/// Producer half. Cheap to clone; all clones feed the same FIFO.
#[derive(Debug, Clone)]
pub struct OutboundQueue {
    tx: mpsc::UnboundedSender<Input>,
}

/// Consumer half, held exclusively by the writer loop.
#[derive(Debug)]
pub struct OutboundReceiver {
    rx: mpsc::UnboundedReceiver<Input>,
}

/// Create a connected queue pair.
pub fn channel() -> (OutboundQueue, OutboundReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (OutboundQueue { tx }, OutboundReceiver { rx })
}

impl OutboundQueue {
    /// Append an input to the queue.
    ///
    /// Returns `false` if the consumer side is gone (connection pump
    /// stopped) — the input is dropped, which matches the post-closure
    /// policy: no sends after `TransportClosed`.
    pub fn enqueue(&self, input: Input) -> bool {
        self.tx.send(input).is_ok()
    }
}

impl OutboundReceiver {
    /// Next input in strict enqueue order; awaits while the queue is empty.
    /// `None` once every producer handle has been dropped.
    pub async fn next(&mut self) -> Option<Input> {
        self.rx.recv().await
    }
}
