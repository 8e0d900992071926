//! In-memory [`QueryContext`] counting every store access.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use wasm_core_types::error::HostError;
use wasm_core_types::{
    CodeId, CodeInfo, ContractCodeHistoryEntry, ContractInfo, Model, RawContractMessage,
};
use wasm_primitives::ContractAddress;
use wasm_query::core::context::{ContractVm, QueryContext, VmError};
use wasm_query::gas::GasMeter;

use crate::fixtures::code::StoredCode;
use crate::vm::MockVm;

#[derive(Debug, Default)]
pub struct MockQueryContext {
    codes: BTreeMap<CodeId, StoredCode>,
    contracts: BTreeMap<ContractAddress, ContractInfo>,
    history: BTreeMap<ContractAddress, Vec<ContractCodeHistoryEntry>>,
    state: BTreeMap<ContractAddress, BTreeMap<Vec<u8>, Vec<u8>>>,
    inactive: BTreeSet<ContractAddress>,
    vm: MockVm,
    store_reads: AtomicUsize,
}

impl MockQueryContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the VM, keeping the bytecode of already added code.
    pub fn with_vm(mut self, vm: MockVm) -> Self {
        self.vm = vm;
        for code in self.codes.values() {
            vm_add_code(&mut self.vm, code);
        }
        self
    }

    pub fn with_code(mut self, code_id: CodeId, code: StoredCode) -> Self {
        vm_add_code(&mut self.vm, &code);
        self.codes.insert(code_id, code);
        self
    }

    pub fn with_contract(mut self, contract: ContractAddress, info: ContractInfo) -> Self {
        self.contracts.insert(contract, info);
        self
    }

    pub fn with_history_entry(
        mut self,
        contract: ContractAddress,
        entry: ContractCodeHistoryEntry,
    ) -> Self {
        self.history.entry(contract).or_default().push(entry);
        self
    }

    pub fn with_state(
        mut self,
        contract: ContractAddress,
        key: impl Into<Vec<u8>>,
        value: impl Into<Vec<u8>>,
    ) -> Self {
        self.state
            .entry(contract)
            .or_default()
            .insert(key.into(), value.into());
        self
    }

    pub fn with_inactive(mut self, contract: ContractAddress) -> Self {
        self.inactive.insert(contract);
        self
    }

    pub fn vm(&self) -> &MockVm {
        &self.vm
    }

    /// Number of store reads served so far.
    pub fn store_reads(&self) -> usize {
        self.store_reads.load(Ordering::SeqCst)
    }

    fn read(&self) {
        self.store_reads.fetch_add(1, Ordering::SeqCst);
    }
}

fn vm_add_code(vm: &mut MockVm, code: &StoredCode) {
    vm.add_byte_code(code.info.code_hash.clone(), code.byte_code.clone());
}

impl QueryContext for MockQueryContext {
    fn contract_info(&self, contract: &ContractAddress) -> Result<Option<ContractInfo>, HostError> {
        self.read();
        Ok(self.contracts.get(contract).cloned())
    }

    fn contracts_by_code(&self, code_id: CodeId) -> Result<Vec<ContractAddress>, HostError> {
        self.read();

        let mut contracts: Vec<_> = self
            .contracts
            .iter()
            .filter(|(_, info)| info.code_id == code_id)
            .map(|(address, info)| (info.created, address.clone()))
            .collect();
        contracts.sort();

        Ok(contracts.into_iter().map(|(_, address)| address).collect())
    }

    fn contract_history(
        &self,
        contract: &ContractAddress,
    ) -> Result<Vec<ContractCodeHistoryEntry>, HostError> {
        self.read();
        Ok(self.history.get(contract).cloned().unwrap_or_default())
    }

    fn inactive_contracts(&self) -> Result<Vec<ContractAddress>, HostError> {
        self.read();
        Ok(self.inactive.iter().cloned().collect())
    }

    fn is_inactive_contract(&self, contract: &ContractAddress) -> Result<bool, HostError> {
        self.read();
        Ok(self.inactive.contains(contract))
    }

    fn contract_state(&self, contract: &ContractAddress) -> Result<Vec<Model>, HostError> {
        self.read();

        let models = self
            .state
            .get(contract)
            .map(|entries| {
                entries
                    .iter()
                    .map(|(key, value)| Model::new(key.clone(), value.clone()))
                    .collect()
            })
            .unwrap_or_default();

        Ok(models)
    }

    fn query_raw(&self, contract: &ContractAddress, key: &[u8]) -> Result<Option<Vec<u8>>, HostError> {
        self.read();
        Ok(self
            .state
            .get(contract)
            .and_then(|entries| entries.get(key))
            .cloned())
    }

    fn query_smart(
        &self,
        contract: &ContractAddress,
        msg: &RawContractMessage,
        gas_meter: &mut GasMeter,
    ) -> Result<Vec<u8>, VmError> {
        let info = self
            .contract_info(contract)?
            .ok_or_else(|| VmError::ContractNotFound {
                address: contract.to_string(),
            })?;

        let code = self
            .code_info(info.code_id)?
            .ok_or(VmError::CodeNotFound {
                code_id: info.code_id,
            })?;

        self.vm.query_smart(contract, &code.code_hash, msg, gas_meter)
    }

    fn code_info(&self, code_id: CodeId) -> Result<Option<CodeInfo>, HostError> {
        self.read();
        Ok(self.codes.get(&code_id).map(|code| code.info.clone()))
    }

    fn code_infos(&self) -> Result<Vec<(CodeId, CodeInfo)>, HostError> {
        self.read();
        Ok(self
            .codes
            .iter()
            .map(|(code_id, code)| (*code_id, code.info.clone()))
            .collect())
    }

    fn byte_code(&self, code_info: &CodeInfo) -> Result<Vec<u8>, VmError> {
        self.vm.byte_code(&code_info.code_hash)
    }
}
