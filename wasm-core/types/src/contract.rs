//! Defines contract instance metadata and the code history of a contract.

use ibc_proto::Protobuf;
use wasm_primitives::prelude::*;

use crate::code::CodeId;
use crate::error::DecodingError;
use crate::msg::RawContractMessage;
use crate::proto::{
    AbsoluteTxPosition as RawAbsoluteTxPosition, ContractCodeHistoryEntry as RawHistoryEntry,
    ContractInfo as RawContractInfo,
};

/// Position of a transaction within the chain, ordered by block height and
/// then by index inside the block.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AbsoluteTxPosition {
    pub block_height: u64,
    pub tx_index: u64,
}

impl AbsoluteTxPosition {
    pub const fn new(block_height: u64, tx_index: u64) -> Self {
        Self {
            block_height,
            tx_index,
        }
    }
}

impl From<RawAbsoluteTxPosition> for AbsoluteTxPosition {
    fn from(raw: RawAbsoluteTxPosition) -> Self {
        Self::new(raw.block_height, raw.tx_index)
    }
}

impl From<AbsoluteTxPosition> for RawAbsoluteTxPosition {
    fn from(value: AbsoluteTxPosition) -> Self {
        Self {
            block_height: value.block_height,
            tx_index: value.tx_index,
        }
    }
}

/// Metadata of an instantiated contract.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractInfo {
    pub code_id: CodeId,
    pub creator: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub admin: String,
    pub label: String,
    /// Instantiation position. Only used to order contracts of the same code.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub created: Option<AbsoluteTxPosition>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub ibc_port_id: String,
}

impl ContractInfo {
    /// Clears the fields that must not leave the store through queries.
    pub fn redact(&mut self) {
        self.created = None;
    }
}

impl Protobuf<RawContractInfo> for ContractInfo {}

impl TryFrom<RawContractInfo> for ContractInfo {
    type Error = DecodingError;

    fn try_from(raw: RawContractInfo) -> Result<Self, Self::Error> {
        if raw.code_id == 0 {
            return Err(DecodingError::invalid_raw_data("contract info code id is zero"));
        }

        Ok(Self {
            code_id: CodeId::new(raw.code_id),
            creator: raw.creator,
            admin: raw.admin,
            label: raw.label,
            created: raw.created.map(Into::into),
            ibc_port_id: raw.ibc_port_id,
        })
    }
}

impl From<ContractInfo> for RawContractInfo {
    fn from(value: ContractInfo) -> Self {
        Self {
            code_id: value.code_id.value(),
            creator: value.creator,
            admin: value.admin,
            label: value.label,
            created: value.created.map(Into::into),
            ibc_port_id: value.ibc_port_id,
        }
    }
}

/// Contract metadata together with the contract address.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractInfoResponse {
    pub address: String,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub contract_info: ContractInfo,
}

/// Kind of change recorded in the code history of a contract.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ContractCodeHistoryOperationType {
    #[default]
    Unspecified,
    Init,
    Migrate,
    Genesis,
}

impl TryFrom<i32> for ContractCodeHistoryOperationType {
    type Error = DecodingError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unspecified),
            1 => Ok(Self::Init),
            2 => Ok(Self::Migrate),
            3 => Ok(Self::Genesis),
            _ => Err(DecodingError::UnknownEnumVariant {
                kind: "ContractCodeHistoryOperationType".to_string(),
                value,
            }),
        }
    }
}

impl From<ContractCodeHistoryOperationType> for i32 {
    fn from(value: ContractCodeHistoryOperationType) -> Self {
        match value {
            ContractCodeHistoryOperationType::Unspecified => 0,
            ContractCodeHistoryOperationType::Init => 1,
            ContractCodeHistoryOperationType::Migrate => 2,
            ContractCodeHistoryOperationType::Genesis => 3,
        }
    }
}

/// One step of a contract's code history.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractCodeHistoryEntry {
    pub operation: ContractCodeHistoryOperationType,
    pub code_id: CodeId,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub updated: Option<AbsoluteTxPosition>,
    pub msg: RawContractMessage,
}

impl ContractCodeHistoryEntry {
    /// Clears the fields that must not leave the store through queries.
    pub fn redact(&mut self) {
        self.updated = None;
    }
}

impl Protobuf<RawHistoryEntry> for ContractCodeHistoryEntry {}

impl TryFrom<RawHistoryEntry> for ContractCodeHistoryEntry {
    type Error = DecodingError;

    fn try_from(raw: RawHistoryEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            operation: raw.operation.try_into()?,
            code_id: CodeId::new(raw.code_id),
            updated: raw.updated.map(Into::into),
            msg: RawContractMessage::new(raw.msg),
        })
    }
}

impl From<ContractCodeHistoryEntry> for RawHistoryEntry {
    fn from(value: ContractCodeHistoryEntry) -> Self {
        Self {
            operation: value.operation.into(),
            code_id: value.code_id.value(),
            updated: value.updated.map(Into::into),
            msg: value.msg.into_bytes(),
        }
    }
}
