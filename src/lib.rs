//! wayfarer - client for server-guided journey dialogs
//!
//! Speaks a turn-based question/answer protocol over a single persistent
//! WebSocket: the server alternates informational statements with requests
//! for typed input, and the client answers in order. The crate is built
//! around a pure state machine ([`journey`]) driven by two concurrent
//! message pumps ([`pump`]) through one event channel ([`runtime`]).

pub mod journey;
pub mod outbound;
pub mod protocol;
pub mod pump;
pub mod runtime;

pub use journey::{
    Connection, Event, Interaction, Journey, Prompt, SessionError, SessionEvent, SessionState,
};
pub use protocol::{DataType, Input, Output, PrimitiveKind};
pub use pump::TransportError;
pub use runtime::{SessionConfig, SessionHandle};
