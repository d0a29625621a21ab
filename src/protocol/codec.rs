//! JSON codec for journey protocol frames
//!
//! One JSON text frame per logical message:
//!
//! ```text
//! {"type":"start","payload":{"filter":"age>18"}}
//! {"type":"continue","payload":{"name":"age","value":"25","dataType":{"type":"long"}}}
//! {"type":"connected","payload":{"message":"hi"}}
//! {"type":"knowThat","payload":{"message":"..."}}
//! {"type":"tellMe","payload":{"name":"age","dataType":{"type":"long"}}}
//! {"type":"done","payload":{"message":"complete"}}
//! ```

use super::types::{Input, Output};
use thiserror::Error;

/// A frame failed to encode or decode
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed frame: {0}")]
    MalformedFrame(#[from] serde_json::Error),
}

/// Encode an outbound message as a JSON text frame.
///
/// Deterministic: the same `Input` always yields the same frame.
pub fn encode(input: &Input) -> Result<String, CodecError> {
    Ok(serde_json::to_string(input)?)
}

/// Decode an inbound JSON text frame.
///
/// Unknown discriminants and missing fields fail with
/// [`CodecError::MalformedFrame`] rather than coercing.
pub fn decode(frame: &str) -> Result<Output, CodecError> {
    Ok(serde_json::from_str(frame)?)
}
