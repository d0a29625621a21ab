//! Mock transports for testing
//!
//! These stand in for the split websocket halves so pump and runtime
//! tests run without a network.

use crate::pump::{FrameSink, FrameSource, TransportError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Frame source fed by a channel; dropping the sender closes the transport.
pub struct MockFrameSource {
    rx: mpsc::UnboundedReceiver<Result<String, TransportError>>,
}

impl MockFrameSource {
    pub fn new() -> (
        Self,
        mpsc::UnboundedSender<Result<String, TransportError>>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { rx }, tx)
    }
}

#[async_trait]
impl FrameSource for MockFrameSource {
    async fn next_frame(&mut self) -> Option<Result<String, TransportError>> {
        self.rx.recv().await
    }
}

/// Frame sink that records every sent frame.
pub struct MockFrameSink {
    sent: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl MockFrameSink {
    pub fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
        let sent = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                sent: sent.clone(),
                fail: false,
            },
            sent,
        )
    }

    /// A sink whose writes always fail, as if the transport had closed.
    pub fn failing() -> (Self, Arc<Mutex<Vec<String>>>) {
        let sent = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                sent: sent.clone(),
                fail: true,
            },
            sent,
        )
    }
}

#[async_trait]
impl FrameSink for MockFrameSink {
    async fn send_frame(&mut self, frame: String) -> Result<(), TransportError> {
        if self.fail {
            return Err(TransportError::Closed);
        }
        self.sent.lock().unwrap().push(frame);
        Ok(())
    }
}
