//! Store key layout of the wasm module.
//!
//! Addresses inside keys carry a one byte length prefix so that keys of
//! different address lengths never share a prefix.

use wasm_core_types::{AbsoluteTxPosition, CodeId};
use wasm_primitives::ContractAddress;

pub const CODE_KEY_PREFIX: &[u8] = &[0x01];
pub const CONTRACT_KEY_PREFIX: &[u8] = &[0x02];
pub const CONTRACT_STORE_PREFIX: &[u8] = &[0x03];
pub const CONTRACT_CODE_HISTORY_ELEMENT_PREFIX: &[u8] = &[0x05];
pub const CONTRACT_BY_CODE_ID_AND_CREATED_SECONDARY_INDEX_PREFIX: &[u8] = &[0x06];
pub const INACTIVE_CONTRACT_PREFIX: &[u8] = &[0x90];

/// Prepends the one byte length of `bytes`.
///
/// Addresses are at most 255 bytes long, which keeps the length in range.
pub fn length_prefixed(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() + 1);
    out.push(bytes.len() as u8);
    out.extend_from_slice(bytes);
    out
}

/// Splits a length prefixed byte string off the front of `bytes`.
pub fn split_length_prefixed(bytes: &[u8]) -> Option<(&[u8], &[u8])> {
    let (len, rest) = bytes.split_first()?;
    let len = usize::from(*len);
    (rest.len() >= len).then(|| rest.split_at(len))
}

fn concat(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}

pub fn code_key(code_id: CodeId) -> Vec<u8> {
    concat(&[CODE_KEY_PREFIX, &code_id.value().to_be_bytes()])
}

pub fn contract_key(contract: &ContractAddress) -> Vec<u8> {
    concat(&[CONTRACT_KEY_PREFIX, &length_prefixed(contract.as_bytes())])
}

pub fn contract_store_prefix(contract: &ContractAddress) -> Vec<u8> {
    concat(&[CONTRACT_STORE_PREFIX, &length_prefixed(contract.as_bytes())])
}

pub fn contract_store_key(contract: &ContractAddress, key: &[u8]) -> Vec<u8> {
    concat(&[&contract_store_prefix(contract), key])
}

pub fn contract_code_history_prefix(contract: &ContractAddress) -> Vec<u8> {
    concat(&[
        CONTRACT_CODE_HISTORY_ELEMENT_PREFIX,
        &length_prefixed(contract.as_bytes()),
    ])
}

/// History entries are keyed by a per contract sequence number.
pub fn contract_code_history_key(contract: &ContractAddress, sequence: u64) -> Vec<u8> {
    concat(&[
        &contract_code_history_prefix(contract),
        &sequence.to_be_bytes(),
    ])
}

pub fn contracts_by_code_prefix(code_id: CodeId) -> Vec<u8> {
    concat(&[
        CONTRACT_BY_CODE_ID_AND_CREATED_SECONDARY_INDEX_PREFIX,
        &code_id.value().to_be_bytes(),
    ])
}

/// Secondary index entry ordering the contracts of a code by creation.
pub fn contract_by_code_key(
    code_id: CodeId,
    created: AbsoluteTxPosition,
    contract: &ContractAddress,
) -> Vec<u8> {
    concat(&[
        &contracts_by_code_prefix(code_id),
        &created.block_height.to_be_bytes(),
        &created.tx_index.to_be_bytes(),
        &length_prefixed(contract.as_bytes()),
    ])
}

pub fn inactive_contract_key(contract: &ContractAddress) -> Vec<u8> {
    concat(&[INACTIVE_CONTRACT_PREFIX, &length_prefixed(contract.as_bytes())])
}

/// Returns the smallest key greater than every key starting with `prefix`,
/// or `None` if no such key exists.
pub fn prefix_end(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < u8::MAX {
            end.push(last + 1);
            return Some(end);
        }
    }
    None
}
