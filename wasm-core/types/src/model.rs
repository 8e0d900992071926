use wasm_primitives::prelude::*;

/// A raw key/value entry of a contract's storage.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Model {
    #[cfg_attr(
        feature = "serde",
        serde(with = "wasm_primitives::serializers::hex_upper")
    )]
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub key: Vec<u8>,
    #[cfg_attr(feature = "serde", serde(with = "wasm_primitives::serializers::base64"))]
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub value: Vec<u8>,
}

impl Model {
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
