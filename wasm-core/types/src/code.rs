//! Defines uploaded code metadata and its access configuration.

use core::num::ParseIntError;
use core::str::FromStr;

use derive_more::{Display, From, Into};
use ibc_proto::Protobuf;
use wasm_primitives::prelude::*;

use crate::error::DecodingError;
use crate::proto::{AccessConfig as RawAccessConfig, CodeInfo as RawCodeInfo};

/// Sequence number assigned to uploaded code.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Display,
)]
pub struct CodeId(u64);

impl CodeId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl FromStr for CodeId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

/// Permission level for instantiating a piece of code.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AccessType {
    #[default]
    Unspecified,
    Nobody,
    OnlyAddress,
    Everybody,
    AnyOfAddresses,
}

impl TryFrom<i32> for AccessType {
    type Error = DecodingError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unspecified),
            1 => Ok(Self::Nobody),
            2 => Ok(Self::OnlyAddress),
            3 => Ok(Self::Everybody),
            4 => Ok(Self::AnyOfAddresses),
            _ => Err(DecodingError::UnknownEnumVariant {
                kind: "AccessType".to_string(),
                value,
            }),
        }
    }
}

impl From<AccessType> for i32 {
    fn from(value: AccessType) -> Self {
        match value {
            AccessType::Unspecified => 0,
            AccessType::Nobody => 1,
            AccessType::OnlyAddress => 2,
            AccessType::Everybody => 3,
            AccessType::AnyOfAddresses => 4,
        }
    }
}

/// Access control for instantiating code.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessConfig {
    pub permission: AccessType,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "String::is_empty")
    )]
    pub address: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub addresses: Vec<String>,
}

impl AccessConfig {
    pub fn everybody() -> Self {
        Self {
            permission: AccessType::Everybody,
            ..Default::default()
        }
    }

    pub fn nobody() -> Self {
        Self {
            permission: AccessType::Nobody,
            ..Default::default()
        }
    }

    pub fn any_of_addresses(addresses: Vec<String>) -> Self {
        Self {
            permission: AccessType::AnyOfAddresses,
            address: String::new(),
            addresses,
        }
    }
}

impl TryFrom<RawAccessConfig> for AccessConfig {
    type Error = DecodingError;

    fn try_from(raw: RawAccessConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            permission: raw.permission.try_into()?,
            address: raw.address,
            addresses: raw.addresses,
        })
    }
}

impl From<AccessConfig> for RawAccessConfig {
    fn from(value: AccessConfig) -> Self {
        Self {
            permission: value.permission.into(),
            address: value.address,
            addresses: value.addresses,
        }
    }
}

/// Metadata kept for every piece of uploaded code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeInfo {
    /// Checksum of the stored bytecode, used to look it up in the VM cache.
    pub code_hash: Vec<u8>,
    pub creator: String,
    pub instantiate_config: AccessConfig,
}

impl Protobuf<RawCodeInfo> for CodeInfo {}

impl TryFrom<RawCodeInfo> for CodeInfo {
    type Error = DecodingError;

    fn try_from(raw: RawCodeInfo) -> Result<Self, Self::Error> {
        if raw.code_hash.is_empty() {
            return Err(DecodingError::missing_raw_data("code info code hash"));
        }

        let instantiate_config = raw
            .instantiate_config
            .map(AccessConfig::try_from)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            code_hash: raw.code_hash,
            creator: raw.creator,
            instantiate_config,
        })
    }
}

impl From<CodeInfo> for RawCodeInfo {
    fn from(value: CodeInfo) -> Self {
        Self {
            code_hash: value.code_hash,
            creator: value.creator,
            instantiate_config: Some(value.instantiate_config.into()),
        }
    }
}

/// Public view of a piece of code as returned by code queries.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeInfoResponse {
    #[cfg_attr(feature = "serde", serde(rename = "id"))]
    pub code_id: CodeId,
    pub creator: String,
    #[cfg_attr(
        feature = "serde",
        serde(with = "wasm_primitives::serializers::hex_upper")
    )]
    pub data_hash: Vec<u8>,
    pub instantiate_permission: AccessConfig,
}

impl CodeInfoResponse {
    pub fn new(code_id: CodeId, info: CodeInfo) -> Self {
        Self {
            code_id,
            creator: info.creator,
            data_hash: info.code_hash,
            instantiate_permission: info.instantiate_config,
        }
    }
}

/// Code metadata together with the bytecode itself.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeResponse {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub info: CodeInfoResponse,
    #[cfg_attr(feature = "serde", serde(with = "wasm_primitives::serializers::base64"))]
    pub data: Vec<u8>,
}
