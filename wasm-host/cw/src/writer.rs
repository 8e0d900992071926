//! Writes wasm module records in the store layout read by
//! [`CwQueryContext`](crate::context::CwQueryContext). Used for genesis
//! import and for seeding stores in tests.

use cosmwasm_std::{Order, Storage};
use ibc_proto::Protobuf;
use wasm_core_types::{CodeId, CodeInfo, ContractCodeHistoryEntry, ContractInfo};
use wasm_primitives::ContractAddress;

use crate::keys::{
    code_key, contract_by_code_key, contract_code_history_key, contract_code_history_prefix,
    contract_key, contract_store_key, inactive_contract_key, prefix_end,
};

pub struct CwStoreWriter<'a> {
    storage: &'a mut dyn Storage,
}

impl<'a> CwStoreWriter<'a> {
    pub fn new(storage: &'a mut dyn Storage) -> Self {
        Self { storage }
    }

    pub fn save_code_info(&mut self, code_id: CodeId, info: CodeInfo) {
        self.storage.set(&code_key(code_id), &info.encode_vec());
    }

    /// Stores contract metadata and indexes the contract under its code,
    /// ordered by creation position.
    pub fn save_contract(&mut self, contract: &ContractAddress, info: ContractInfo) {
        let created = info.created.unwrap_or_default();

        self.storage.set(
            &contract_by_code_key(info.code_id, created, contract),
            &[1],
        );
        self.storage.set(&contract_key(contract), &info.encode_vec());
    }

    /// Appends an entry to the contract's code history.
    pub fn append_history_entry(&mut self, contract: &ContractAddress, entry: ContractCodeHistoryEntry) {
        let prefix = contract_code_history_prefix(contract);
        let end = prefix_end(&prefix);
        let sequence = self
            .storage
            .range(Some(&prefix), end.as_deref(), Order::Ascending)
            .count() as u64;

        self.storage.set(
            &contract_code_history_key(contract, sequence),
            &entry.encode_vec(),
        );
    }

    /// Sets a contract state entry. The store rejects empty values.
    pub fn set_state(&mut self, contract: &ContractAddress, key: &[u8], value: &[u8]) {
        self.storage.set(&contract_store_key(contract, key), value);
    }

    pub fn set_inactive(&mut self, contract: &ContractAddress) {
        self.storage.set(&inactive_contract_key(contract), &[1]);
    }

    pub fn set_active(&mut self, contract: &ContractAddress) {
        self.storage.remove(&inactive_contract_key(contract));
    }
}
