//! Defines the VM side packet and its translation from a channel packet.

use wasm_primitives::prelude::*;

use crate::proto::{RawHeight, RawPacket};

/// One side of a channel as seen by a contract.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VmEndpoint {
    pub port_id: String,
    pub channel_id: String,
}

/// Block height based timeout. `revision` is the chain revision number.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VmTimeoutBlock {
    pub revision: u64,
    pub height: u64,
}

/// Packet timeout. At least one of the two bounds is set for any packet the
/// channel accepted, and both may be.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VmTimeout {
    pub block: Option<VmTimeoutBlock>,
    /// Nanoseconds since the unix epoch.
    #[cfg_attr(
        feature = "serde",
        serde(default, with = "wasm_primitives::serializers::option_u64_string")
    )]
    #[cfg_attr(feature = "schema", schemars(with = "Option<String>"))]
    pub timestamp: Option<u64>,
}

impl VmTimeout {
    pub fn has_block(&self) -> bool {
        self.block.is_some()
    }

    pub fn has_timestamp(&self) -> bool {
        self.timestamp.is_some()
    }
}

/// Packet structure handed to a contract's IBC entry points.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VmPacket {
    #[cfg_attr(feature = "serde", serde(with = "wasm_primitives::serializers::base64"))]
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub data: Vec<u8>,
    pub src: VmEndpoint,
    pub dest: VmEndpoint,
    pub sequence: u64,
    pub timeout: VmTimeout,
}

fn to_vm_timeout(height: Option<&RawHeight>, timestamp: u64) -> VmTimeout {
    let block = height
        .filter(|h| h.revision_number != 0 || h.revision_height != 0)
        .map(|h| VmTimeoutBlock {
            revision: h.revision_number,
            height: h.revision_height,
        });

    VmTimeout {
        block,
        timestamp: (timestamp != 0).then_some(timestamp),
    }
}

/// Translates a channel packet into the VM packet structure.
///
/// Endpoints, sequence and data are copied verbatim. A zero timeout height
/// (or none at all) and a zero timeout timestamp are treated as unset.
pub fn to_vm_packet(packet: &RawPacket) -> VmPacket {
    VmPacket {
        data: packet.data.clone(),
        src: VmEndpoint {
            port_id: packet.source_port.clone(),
            channel_id: packet.source_channel.clone(),
        },
        dest: VmEndpoint {
            port_id: packet.destination_port.clone(),
            channel_id: packet.destination_channel.clone(),
        },
        sequence: packet.sequence,
        timeout: to_vm_timeout(packet.timeout_height.as_ref(), packet.timeout_timestamp),
    }
}

impl From<RawPacket> for VmPacket {
    fn from(packet: RawPacket) -> Self {
        let timeout = to_vm_timeout(packet.timeout_height.as_ref(), packet.timeout_timestamp);

        Self {
            data: packet.data,
            src: VmEndpoint {
                port_id: packet.source_port,
                channel_id: packet.source_channel,
            },
            dest: VmEndpoint {
                port_id: packet.destination_port,
                channel_id: packet.destination_channel,
            },
            sequence: packet.sequence,
            timeout,
        }
    }
}
