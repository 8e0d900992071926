use std::num::ParseIntError;

use displaydoc::Display;
use wasm_core_types::error::{DecodingError, HostError};
use wasm_primitives::AddressError;

use crate::core::context::VmError;
use crate::gas::GasError;

/// Codespace of errors registered by the base SDK.
pub const SDK_CODESPACE: &str = "sdk";

/// Codespace of errors registered by the wasm module.
pub const WASM_CODESPACE: &str = "wasm";

/// The main error type of the wasm-query crate.
#[derive(Debug, Display)]
pub enum QueryError {
    /// invalid address `{address}`: `{error}`
    InvalidAddress { address: String, error: AddressError },
    /// invalid code id `{value}`: `{error}`
    InvalidArgument { value: String, error: ParseIntError },
    /// unknown request: `{description}`
    UnknownRequest { description: String },
    /// json msg: `{0}`
    ValidationFailure(DecodingError),
    /// out of gas: `{0}`
    OutOfGas(GasError),
    /// query failed: `{0}`
    VmExecution(VmError),
    /// failed to marshal JSON: `{description}`
    Marshal { description: String },
    /// host error: `{0}`
    Host(HostError),
}

impl QueryError {
    pub fn unknown_request(description: impl ToString) -> Self {
        Self::UnknownRequest {
            description: description.to_string(),
        }
    }

    /// Codespace the error is registered under on chain.
    pub fn codespace(&self) -> &'static str {
        match self {
            Self::InvalidAddress { .. }
            | Self::UnknownRequest { .. }
            | Self::OutOfGas(_)
            | Self::Marshal { .. } => SDK_CODESPACE,
            Self::InvalidArgument { .. }
            | Self::ValidationFailure(_)
            | Self::VmExecution(_)
            | Self::Host(_) => WASM_CODESPACE,
        }
    }

    /// Error code within [`codespace`](Self::codespace).
    pub fn code(&self) -> u32 {
        match self {
            Self::UnknownRequest { .. } => 6,
            Self::InvalidAddress { .. } => 7,
            Self::OutOfGas(_) => 11,
            Self::Marshal { .. } => 16,
            Self::InvalidArgument { .. } | Self::ValidationFailure(_) => 14,
            Self::VmExecution(_) | Self::Host(_) => 9,
        }
    }
}

impl From<HostError> for QueryError {
    fn from(e: HostError) -> Self {
        Self::Host(e)
    }
}

impl From<GasError> for QueryError {
    fn from(e: GasError) -> Self {
        Self::OutOfGas(e)
    }
}

impl From<VmError> for QueryError {
    fn from(e: VmError) -> Self {
        match e {
            VmError::OutOfGas(e) => Self::OutOfGas(e),
            VmError::Host(e) => Self::Host(e),
            e => Self::VmExecution(e),
        }
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(e: serde_json::Error) -> Self {
        Self::Marshal {
            description: e.to_string(),
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidAddress { error, .. } => Some(error),
            Self::InvalidArgument { error, .. } => Some(error),
            Self::ValidationFailure(e) => Some(e),
            Self::OutOfGas(e) => Some(e),
            Self::VmExecution(e) => Some(e),
            Self::Host(e) => Some(e),
            Self::UnknownRequest { .. } | Self::Marshal { .. } => None,
        }
    }
}
