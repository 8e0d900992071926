//! Messages passed to a contract's packet entry points.

use wasm_primitives::prelude::*;
use wasm_primitives::Signer;

use crate::packet::{to_vm_packet, VmPacket};
use crate::proto::RawPacket;

/// Acknowledgement bytes written by the counterparty.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VmAcknowledgement {
    #[cfg_attr(feature = "serde", serde(with = "wasm_primitives::serializers::base64"))]
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub data: Vec<u8>,
}

impl VmAcknowledgement {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VmPacketReceiveMsg {
    pub packet: VmPacket,
    pub relayer: Signer,
}

impl VmPacketReceiveMsg {
    pub fn new(packet: &RawPacket, relayer: Signer) -> Self {
        Self {
            packet: to_vm_packet(packet),
            relayer,
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VmPacketAckMsg {
    pub acknowledgement: VmAcknowledgement,
    pub original_packet: VmPacket,
    pub relayer: Signer,
}

impl VmPacketAckMsg {
    pub fn new(acknowledgement: impl Into<Vec<u8>>, packet: &RawPacket, relayer: Signer) -> Self {
        Self {
            acknowledgement: VmAcknowledgement::new(acknowledgement),
            original_packet: to_vm_packet(packet),
            relayer,
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VmPacketTimeoutMsg {
    pub packet: VmPacket,
    pub relayer: Signer,
}

impl VmPacketTimeoutMsg {
    pub fn new(packet: &RawPacket, relayer: Signer) -> Self {
        Self {
            packet: to_vm_packet(packet),
            relayer,
        }
    }
}
