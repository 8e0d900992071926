//! Defines the opaque JSON message handed to a contract.

use derive_more::{From, Into};
use wasm_primitives::prelude::*;

use crate::error::DecodingError;

/// JSON encoded message addressed to a contract, kept as the exact bytes
/// received.
#[derive(Clone, Debug, Default, PartialEq, Eq, From, Into)]
pub struct RawContractMessage(Vec<u8>);

impl RawContractMessage {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks that the message is a JSON object with at least one top level
    /// key, which is the shape every contract entry point dispatches on.
    pub fn validate_basic(&self) -> Result<(), DecodingError> {
        if self.0.is_empty() {
            return Err(DecodingError::InvalidJson {
                description: "empty message".to_string(),
            });
        }

        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(&self.0)
            .map_err(|e| DecodingError::InvalidJson {
                description: e.to_string(),
            })?;

        if object.is_empty() {
            return Err(DecodingError::InvalidJson {
                description: "message object has no keys".to_string(),
            });
        }

        Ok(())
    }
}

impl AsRef<[u8]> for RawContractMessage {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Embeds the stored JSON verbatim. An empty message is written as `null`.
#[cfg(feature = "serde")]
impl serde::Serialize for RawContractMessage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::Error as _;

        if self.0.is_empty() {
            return serializer.serialize_none();
        }

        let raw: &serde_json::value::RawValue =
            serde_json::from_slice(&self.0).map_err(S::Error::custom)?;
        serde::Serialize::serialize(raw, serializer)
    }
}
