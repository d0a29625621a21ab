//! Core journey state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions:
//! every confirmed-sent input and received output is folded into the
//! session state by [`transition`], which also decides what side effects
//! the runtime must perform.

mod effect;
mod event;
#[cfg(test)]
mod proptests;
mod state;
mod transition;

pub use effect::{Effect, SessionEvent};
pub use event::Event;
pub use state::{Connection, Interaction, Journey, Prompt, SessionState};
pub use transition::{transition, SessionError, TransitionResult};
