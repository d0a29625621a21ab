//! Effects produced by state transitions

use super::state::{Interaction, Prompt};
use crate::protocol::Input;

/// Effects to be executed by the runtime after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Put an input on the outbound queue for the writer loop
    Enqueue(Input),
    /// Notify subscribed collaborators
    Publish(SessionEvent),
}

/// Updates broadcast to presentation collaborators
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The server greeted us; the session is ready for a start
    Connected { greeting: String },
    /// An interaction was folded into the open journey
    InteractionAdded { interaction: Interaction },
    /// The server is waiting on a typed answer
    PromptPending { prompt: Prompt },
    /// The open journey finished; a fresh one is ready for the next start
    JourneySealed { message: String },
    /// The transport closed; no further folds will occur
    Closed,
    /// A recoverable error was reported (sequencing violation, rejected
    /// trigger, malformed frame)
    Error { message: String },
}
