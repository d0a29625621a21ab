//! Journey wire protocol
//!
//! Semantic message types and the JSON codec that maps them onto the
//! server's frame format. The discriminant tag and field names are the
//! compatibility contract with the server — see `codec` for the exact shape.

mod codec;
#[cfg(test)]
mod proptests;
mod types;

pub use codec::{decode, encode, CodecError};
pub use types::{DataType, Input, Output, PrimitiveKind};
