//! Session runtime
//!
//! Wires the connection pump, outbound queue, and journey state machine
//! together, and exposes the collaborator-facing surface: fire-and-forget
//! triggers in, broadcast updates and copy-on-read snapshots out.

mod executor;
#[cfg(test)]
pub mod testing;

pub use executor::SessionRuntime;

use crate::journey::{Event, SessionEvent, SessionState};
use crate::outbound;
use crate::pump::{self, ConnectionPump, FrameSink, FrameSource, TransportError};
use tokio::sync::{broadcast, mpsc, watch};

/// Injected configuration for one session. Created at session start,
/// dropped with the handle at session end.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Server authority, e.g. `"localhost:9876"`
    pub address: String,
    /// Select `wss` instead of `ws`
    pub secure: bool,
}

impl SessionConfig {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            secure: false,
        }
    }
}

/// Handle to a running session
///
/// Triggers are fire-and-forget: rejections (`NoActiveConnection`,
/// `NoPendingPrompt`, sequencing violations) come back as
/// [`SessionEvent::Error`] on the update stream.
pub struct SessionHandle {
    event_tx: mpsc::UnboundedSender<Event>,
    updates_tx: broadcast::Sender<SessionEvent>,
    snapshot_rx: watch::Receiver<SessionState>,
    pump: ConnectionPump,
}

impl SessionHandle {
    /// Dial the server and arm the session.
    ///
    /// The session is not usable for starts until the server's greeting
    /// arrives; watch for [`SessionEvent::Connected`].
    pub async fn connect(config: SessionConfig) -> Result<Self, TransportError> {
        let (sink, source) = pump::dial(&config.address, config.secure).await?;
        Ok(Self::attach(source, sink))
    }

    /// Arm a session over an already-open transport.
    pub fn attach<Src, Snk>(source: Src, sink: Snk) -> Self
    where
        Src: FrameSource,
        Snk: FrameSink,
    {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (queue, outbound_rx) = outbound::channel();
        let (updates_tx, _) = broadcast::channel(128);
        let (snapshot_tx, snapshot_rx) = watch::channel(SessionState::new());

        let pump = ConnectionPump::open(source, sink, outbound_rx, event_tx.clone());
        let runtime = SessionRuntime::new(event_rx, queue, updates_tx.clone(), snapshot_tx);
        tokio::spawn(runtime.run());

        Self {
            event_tx,
            updates_tx,
            snapshot_rx,
            pump,
        }
    }

    /// Begin a new journey with the given filter.
    pub fn start_with(&self, filter: impl Into<String>) {
        let _ = self.event_tx.send(Event::StartRequested {
            filter: filter.into(),
        });
    }

    /// Answer the outstanding prompt.
    pub fn answer(&self, value: impl Into<String>) {
        let _ = self.event_tx.send(Event::AnswerRequested {
            value: value.into(),
        });
    }

    /// Subscribe to session updates.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.updates_tx.subscribe()
    }

    /// Copy-on-read snapshot of the connection and full journey history.
    pub fn snapshot(&self) -> SessionState {
        self.snapshot_rx.borrow().clone()
    }

    /// Explicitly close the connection. Terminal for this session, like a
    /// transport error: the closure is folded, later triggers are rejected,
    /// and a new session requires a fresh [`SessionHandle::connect`].
    pub fn close(&self) {
        self.pump.shutdown();
        let _ = self.event_tx.send(Event::TransportClosed);
    }
}
