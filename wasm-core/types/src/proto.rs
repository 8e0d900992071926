//! Raw protobuf messages of the records the wasm module keeps in its store.
//!
//! Field numbers follow the `cosmwasm.wasm.v1` package so that records
//! written by the chain decode here unchanged.

use wasm_primitives::prelude::*;

/// AccessConfig access control type.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccessConfig {
    #[prost(int32, tag = "1")]
    pub permission: i32,
    #[prost(string, tag = "2")]
    pub address: String,
    #[prost(string, repeated, tag = "3")]
    pub addresses: Vec<String>,
}

/// CodeInfo is data for the uploaded contract WASM code.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CodeInfo {
    #[prost(bytes = "vec", tag = "1")]
    pub code_hash: Vec<u8>,
    #[prost(string, tag = "2")]
    pub creator: String,
    #[prost(message, optional, tag = "5")]
    pub instantiate_config: Option<AccessConfig>,
}

/// AbsoluteTxPosition is a unique transaction position that allows for
/// global ordering of transactions.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AbsoluteTxPosition {
    #[prost(uint64, tag = "1")]
    pub block_height: u64,
    #[prost(uint64, tag = "2")]
    pub tx_index: u64,
}

/// ContractInfo stores a WASM contract instance.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ContractInfo {
    #[prost(uint64, tag = "1")]
    pub code_id: u64,
    #[prost(string, tag = "2")]
    pub creator: String,
    #[prost(string, tag = "3")]
    pub admin: String,
    #[prost(string, tag = "4")]
    pub label: String,
    #[prost(message, optional, tag = "5")]
    pub created: Option<AbsoluteTxPosition>,
    #[prost(string, tag = "6")]
    pub ibc_port_id: String,
}

/// ContractCodeHistoryEntry metadata to a contract.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ContractCodeHistoryEntry {
    #[prost(int32, tag = "1")]
    pub operation: i32,
    #[prost(uint64, tag = "2")]
    pub code_id: u64,
    #[prost(message, optional, tag = "3")]
    pub updated: Option<AbsoluteTxPosition>,
    #[prost(bytes = "vec", tag = "4")]
    pub msg: Vec<u8>,
}
