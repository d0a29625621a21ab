//! Session state types
//!
//! The runner history: an ordered record of journeys, each an append-only
//! sequence of interactions. Mutated only by the transition function;
//! presentation collaborators see copy-on-read snapshots.

use crate::protocol::{DataType, Input, Output};
use serde::{Deserialize, Serialize};

/// An outstanding `TellMe` request awaiting exactly one answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub name: String,
    pub data_type: DataType,
}

/// One message of a journey, stored verbatim in send/receive order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "direction", rename_all = "snake_case")]
pub enum Interaction {
    Sent(Input),
    Received(Output),
}

/// One guided dialog instance, from Start to Done
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journey {
    /// The outstanding prompt, if the server is waiting on an answer
    pub pending_prompt: Option<Prompt>,
    /// Append-only; never reordered or truncated
    pub interactions: Vec<Interaction>,
    /// Set when the terminal Done output has been folded in
    pub sealed: bool,
}

impl Journey {
    pub fn is_open(&self) -> bool {
        !self.sealed
    }
}

/// Connection status, set once per socket lifetime
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub is_connected: bool,
    /// Message carried by the server's Connected output
    pub greeting: Option<String>,
}

/// The authoritative session record: connection status plus all journeys,
/// newest last. At most the last journey is open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub connection: Connection,
    pub journeys: Vec<Journey>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The journey still accepting interactions, if any.
    pub fn open_journey(&self) -> Option<&Journey> {
        self.journeys.last().filter(|j| j.is_open())
    }

    pub(crate) fn open_journey_mut(&mut self) -> Option<&mut Journey> {
        self.journeys.last_mut().filter(|j| j.is_open())
    }

    /// The open journey's outstanding prompt, if any — what the next
    /// answer must be typed as.
    pub fn pending_prompt(&self) -> Option<&Prompt> {
        self.open_journey().and_then(|j| j.pending_prompt.as_ref())
    }
}
