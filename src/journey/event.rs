//! Events that drive the session state machine

use crate::protocol::{Input, Output};

/// Everything that can advance a session: external triggers from the
/// collaborator surface, and publications from the connection pump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // External triggers
    StartRequested { filter: String },
    AnswerRequested { value: String },

    // Pump publications
    /// The writer loop finished transmitting this input
    SendConfirmed(Input),
    /// The reader loop decoded this output
    OutputReceived(Output),
    /// The reader loop dropped a frame that failed to decode
    FrameRejected { reason: String },
    /// The transport closed; terminal for this connection
    TransportClosed,
}
