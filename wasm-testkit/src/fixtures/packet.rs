use typed_builder::TypedBuilder;
use wasm_ibc::proto::{RawHeight, RawPacket};

/// Configuration of the channel packet used throughout the packet tests.
///
/// The defaults describe a packet on `srcPort/channel-1` to
/// `destPort/channel-2` with sequence 1, data `myData` and a height timeout
/// at revision 2, height 1.
#[derive(TypedBuilder, Debug)]
#[builder(build_method(into = RawPacket))]
pub struct PacketConfig {
    #[builder(default = 1)]
    pub sequence: u64,
    #[builder(default = "srcPort".to_string(), setter(into))]
    pub source_port: String,
    #[builder(default = "channel-1".to_string(), setter(into))]
    pub source_channel: String,
    #[builder(default = "destPort".to_string(), setter(into))]
    pub destination_port: String,
    #[builder(default = "channel-2".to_string(), setter(into))]
    pub destination_channel: String,
    #[builder(default = b"myData".to_vec(), setter(into))]
    pub data: Vec<u8>,
    #[builder(default = Some(dummy_height(2, 1)))]
    pub timeout_height: Option<RawHeight>,
    #[builder(default)]
    pub timeout_timestamp: u64,
}

impl From<PacketConfig> for RawPacket {
    fn from(config: PacketConfig) -> Self {
        RawPacket {
            sequence: config.sequence,
            source_port: config.source_port,
            source_channel: config.source_channel,
            destination_port: config.destination_port,
            destination_channel: config.destination_channel,
            data: config.data,
            timeout_height: config.timeout_height,
            timeout_timestamp: config.timeout_timestamp,
        }
    }
}

pub fn dummy_height(revision_number: u64, revision_height: u64) -> RawHeight {
    RawHeight {
        revision_number,
        revision_height,
    }
}
