//! Semantic message types for the journey protocol

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive kind of a value the server may ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Long,
    String,
    Boolean,
    Double,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveKind::Long => "long",
            PrimitiveKind::String => "string",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Double => "double",
        };
        f.write_str(name)
    }
}

/// Server-assigned type descriptor, echoed back unchanged in the next
/// `Continue`. Opaque to the client beyond round-tripping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataType {
    #[serde(rename = "type")]
    pub kind: PrimitiveKind,
}

impl DataType {
    pub fn new(kind: PrimitiveKind) -> Self {
        Self { kind }
    }
}

/// Client -> server messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Input {
    #[serde(rename_all = "camelCase")]
    Start { filter: String },
    #[serde(rename_all = "camelCase")]
    Continue {
        name: String,
        value: String,
        data_type: DataType,
    },
}

impl Input {
    pub fn start(filter: impl Into<String>) -> Self {
        Input::Start {
            filter: filter.into(),
        }
    }

    pub fn continue_with(
        name: impl Into<String>,
        value: impl Into<String>,
        data_type: DataType,
    ) -> Self {
        Input::Continue {
            name: name.into(),
            value: value.into(),
            data_type,
        }
    }
}

/// Server -> client messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Output {
    #[serde(rename_all = "camelCase")]
    Connected { message: String },
    #[serde(rename_all = "camelCase")]
    KnowThat { message: String },
    #[serde(rename_all = "camelCase")]
    TellMe { name: String, data_type: DataType },
    #[serde(rename_all = "camelCase")]
    Done { message: String },
}
