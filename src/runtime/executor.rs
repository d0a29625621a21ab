//! Session runtime executor
//!
//! The single point of control for session state: events from the pump
//! and from external triggers arrive over one channel and are folded
//! strictly sequentially, so no two folds can ever interleave.

use crate::journey::{transition, Effect, Event, SessionEvent, SessionState};
use crate::outbound::OutboundQueue;
use tokio::sync::{broadcast, mpsc, watch};

pub struct SessionRuntime {
    state: SessionState,
    event_rx: mpsc::UnboundedReceiver<Event>,
    outbound: OutboundQueue,
    updates_tx: broadcast::Sender<SessionEvent>,
    snapshot_tx: watch::Sender<SessionState>,
}

impl SessionRuntime {
    pub fn new(
        event_rx: mpsc::UnboundedReceiver<Event>,
        outbound: OutboundQueue,
        updates_tx: broadcast::Sender<SessionEvent>,
        snapshot_tx: watch::Sender<SessionState>,
    ) -> Self {
        Self {
            state: SessionState::new(),
            event_rx,
            outbound,
            updates_tx,
            snapshot_tx,
        }
    }

    pub async fn run(mut self) {
        tracing::info!("session runtime started");

        while let Some(event) = self.event_rx.recv().await {
            let terminal = matches!(event, Event::TransportClosed);

            match transition(&self.state, event) {
                Ok(result) => {
                    self.state = result.new_state;
                    let _ = self.snapshot_tx.send(self.state.clone());
                    for effect in result.effects {
                        self.execute(effect);
                    }
                }
                Err(e) => {
                    // Recovered locally: reported, prior state kept.
                    tracing::warn!(error = %e, "event rejected");
                    let _ = self.updates_tx.send(SessionEvent::Error {
                        message: e.to_string(),
                    });
                }
            }

            // Transport closure is terminal; no further folds occur.
            if terminal {
                break;
            }
        }

        tracing::info!("session runtime stopped");
    }

    fn execute(&self, effect: Effect) {
        match effect {
            Effect::Enqueue(input) => {
                if !self.outbound.enqueue(input) {
                    tracing::warn!("outbound queue gone, input dropped");
                }
            }
            Effect::Publish(event) => {
                // Err just means nobody is subscribed right now.
                let _ = self.updates_tx.send(event);
            }
        }
    }
}
