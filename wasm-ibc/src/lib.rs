//! Bridges IBC channel packets into the packet structure understood by the
//! contract VM.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

pub mod msgs;
pub mod packet;

pub use msgs::*;
pub use packet::*;

/// Re-exports the chain-native packet types from `ibc-proto`.
pub mod proto {
    pub use ibc_proto::ibc::core::channel::v1::Packet as RawPacket;
    pub use ibc_proto::ibc::core::client::v1::Height as RawHeight;
}
