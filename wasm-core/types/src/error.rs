//! Foundational error types shared across the wasm module crates.

use displaydoc::Display;
use wasm_primitives::prelude::*;

/// Errors that originate from host store implementations.
#[derive(Debug, Display)]
pub enum HostError {
    /// missing data: `{description}`
    MissingData { description: String },
    /// failed to retrieve data from store: `{description}`
    FailedToRetrieveFromStore { description: String },
    /// failed to parse data: `{description}`
    FailedToParseData { description: String },
    /// decoding error: `{0}`
    Decoding(DecodingError),
    /// other error: `{description}`
    Other { description: String },
}

/// Errors that occur during the process of decoding, deserializing,
/// and/or converting raw types into domain types.
#[derive(Debug, Display)]
pub enum DecodingError {
    /// protobuf decoding error: `{description}`
    Protobuf { description: String },
    /// invalid JSON data: `{description}`
    InvalidJson { description: String },
    /// invalid raw data: `{description}`
    InvalidRawData { description: String },
    /// missing raw data: `{description}`
    MissingRawData { description: String },
    /// unknown `{kind}` variant: `{value}`
    UnknownEnumVariant { kind: String, value: i32 },
}

impl DecodingError {
    pub fn invalid_raw_data(description: impl ToString) -> Self {
        Self::InvalidRawData {
            description: description.to_string(),
        }
    }

    pub fn missing_raw_data(description: impl ToString) -> Self {
        Self::MissingRawData {
            description: description.to_string(),
        }
    }
}

impl From<DecodingError> for HostError {
    fn from(e: DecodingError) -> Self {
        Self::Decoding(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodingError {}

#[cfg(feature = "std")]
impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decoding(e) => Some(e),
            _ => None,
        }
    }
}
