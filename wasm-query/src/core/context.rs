//! Required traits a host implements to serve wasm queries.

use displaydoc::Display;
use wasm_core_types::error::HostError;
use wasm_core_types::{
    CodeId, CodeInfo, ContractCodeHistoryEntry, ContractInfo, Model, RawContractMessage,
};
use wasm_primitives::ContractAddress;

use crate::gas::{GasError, GasMeter};

/// Errors reported by the contract VM.
#[derive(Debug, Display)]
pub enum VmError {
    /// out of gas: `{0}`
    OutOfGas(GasError),
    /// contract execution failed: `{description}`
    Execution { description: String },
    /// contract `{address}` not found
    ContractNotFound { address: String },
    /// code `{code_id}` not found
    CodeNotFound { code_id: CodeId },
    /// host error: `{0}`
    Host(HostError),
}

impl VmError {
    pub fn execution(description: impl ToString) -> Self {
        Self::Execution {
            description: description.to_string(),
        }
    }
}

impl From<GasError> for VmError {
    fn from(e: GasError) -> Self {
        Self::OutOfGas(e)
    }
}

impl From<HostError> for VmError {
    fn from(e: HostError) -> Self {
        Self::Host(e)
    }
}

impl std::error::Error for VmError {}

/// The contract VM as seen by the query path: it runs a contract's query
/// entry point and serves bytecode out of its code cache.
pub trait ContractVm {
    /// Runs the query entry point of the contract whose code has
    /// `code_hash`, charging every step to `gas_meter`. The meter counts
    /// VM gas.
    fn query_smart(
        &self,
        contract: &ContractAddress,
        code_hash: &[u8],
        msg: &RawContractMessage,
        gas_meter: &mut GasMeter,
    ) -> Result<Vec<u8>, VmError>;

    /// Returns the bytecode stored under `code_hash`.
    fn byte_code(&self, code_hash: &[u8]) -> Result<Vec<u8>, VmError>;
}

/// Read-only view of the wasm module's store, narrowed to what the query
/// handlers need. Implementations must not mutate state.
pub trait QueryContext {
    // Contract queries

    /// Returns the metadata of the given contract, if it exists.
    fn contract_info(&self, contract: &ContractAddress) -> Result<Option<ContractInfo>, HostError>;

    /// Returns the contracts instantiated from `code_id`, in instantiation order.
    fn contracts_by_code(&self, code_id: CodeId) -> Result<Vec<ContractAddress>, HostError>;

    /// Returns the code history of the given contract, oldest entry first.
    fn contract_history(
        &self,
        contract: &ContractAddress,
    ) -> Result<Vec<ContractCodeHistoryEntry>, HostError>;

    /// Returns the addresses of all inactive contracts.
    fn inactive_contracts(&self) -> Result<Vec<ContractAddress>, HostError>;

    fn is_inactive_contract(&self, contract: &ContractAddress) -> Result<bool, HostError>;

    // Contract state queries

    /// Returns every entry of the contract's storage in store key order.
    fn contract_state(&self, contract: &ContractAddress) -> Result<Vec<Model>, HostError>;

    /// Returns the value stored under `key` in the contract's storage.
    fn query_raw(&self, contract: &ContractAddress, key: &[u8]) -> Result<Option<Vec<u8>>, HostError>;

    /// Runs the contract's query entry point under `gas_meter`.
    fn query_smart(
        &self,
        contract: &ContractAddress,
        msg: &RawContractMessage,
        gas_meter: &mut GasMeter,
    ) -> Result<Vec<u8>, VmError>;

    // Code queries

    fn code_info(&self, code_id: CodeId) -> Result<Option<CodeInfo>, HostError>;

    /// Returns all code infos in ascending code id order.
    fn code_infos(&self) -> Result<Vec<(CodeId, CodeInfo)>, HostError>;

    /// Returns the bytecode described by an already loaded `code_info`.
    fn byte_code(&self, code_info: &CodeInfo) -> Result<Vec<u8>, VmError>;
}
