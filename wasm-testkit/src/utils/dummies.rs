use wasm_primitives::{AddressCodec, ContractAddress, Signer};

/// Bech32 prefix used by all dummy addresses.
pub const DUMMY_PREFIX: &str = "wasm";

/// Returns the address codec all dummies are encoded with.
pub fn dummy_codec() -> AddressCodec {
    AddressCodec::new(DUMMY_PREFIX).expect("valid prefix")
}

/// Returns a 32 byte contract address filled with `byte`.
pub fn dummy_contract_address(byte: u8) -> ContractAddress {
    dummy_codec()
        .from_bytes(vec![byte; 32])
        .expect("valid address bytes")
}

/// Returns the textual form of [`dummy_contract_address`].
pub fn dummy_bech32(byte: u8) -> String {
    dummy_contract_address(byte).to_string()
}

pub fn dummy_account(byte: u8) -> String {
    dummy_codec()
        .from_bytes(vec![byte; 20])
        .expect("valid address bytes")
        .to_string()
}

pub fn dummy_relayer() -> Signer {
    Signer::new(dummy_account(0xee))
}
