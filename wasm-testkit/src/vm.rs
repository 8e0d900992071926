//! Contract VM double recording every invocation.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use tracing::debug;
use wasm_core_types::RawContractMessage;
use wasm_primitives::ContractAddress;
use wasm_query::core::context::{ContractVm, VmError};
use wasm_query::gas::{Gas, GasMeter};

/// What the mock answers to a smart query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockVmBehavior {
    /// Return the query message unchanged.
    Echo,
    /// Return fixed bytes.
    Respond(Vec<u8>),
    /// Fail with a contract level error.
    Fail(String),
    /// Keep consuming gas until the meter runs dry.
    ExhaustGas,
}

/// A smart query as observed by the mock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub contract: ContractAddress,
    pub code_hash: Vec<u8>,
    pub msg: RawContractMessage,
    pub gas_limit: Gas,
}

#[derive(Debug)]
pub struct MockVm {
    behavior: MockVmBehavior,
    query_cost: Gas,
    byte_codes: BTreeMap<Vec<u8>, Vec<u8>>,
    invocations: Mutex<Vec<Invocation>>,
}

impl Default for MockVm {
    fn default() -> Self {
        Self::new(MockVmBehavior::Echo)
    }
}

impl MockVm {
    pub fn new(behavior: MockVmBehavior) -> Self {
        Self {
            behavior,
            query_cost: 1_000,
            byte_codes: BTreeMap::new(),
            invocations: Mutex::new(Vec::new()),
        }
    }

    pub fn with_query_cost(mut self, query_cost: Gas) -> Self {
        self.query_cost = query_cost;
        self
    }

    pub fn with_byte_code(mut self, code_hash: Vec<u8>, byte_code: Vec<u8>) -> Self {
        self.byte_codes.insert(code_hash, byte_code);
        self
    }

    pub fn add_byte_code(&mut self, code_hash: Vec<u8>, byte_code: Vec<u8>) {
        self.byte_codes.insert(code_hash, byte_code);
    }

    pub fn invocation_count(&self) -> usize {
        self.invocations.lock().len()
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().clone()
    }
}

impl ContractVm for MockVm {
    fn query_smart(
        &self,
        contract: &ContractAddress,
        code_hash: &[u8],
        msg: &RawContractMessage,
        gas_meter: &mut GasMeter,
    ) -> Result<Vec<u8>, VmError> {
        self.invocations.lock().push(Invocation {
            contract: contract.clone(),
            code_hash: code_hash.to_vec(),
            msg: msg.clone(),
            gas_limit: gas_meter.limit(),
        });

        debug!(%contract, behavior = ?self.behavior, "mock vm query");

        match &self.behavior {
            MockVmBehavior::ExhaustGas => loop {
                gas_meter.consume(self.query_cost.max(1), "mock vm loop")?;
            },
            behavior => {
                gas_meter.consume(self.query_cost, "mock vm query")?;
                match behavior {
                    MockVmBehavior::Respond(bytes) => Ok(bytes.clone()),
                    MockVmBehavior::Fail(description) => Err(VmError::execution(description)),
                    _ => Ok(msg.as_bytes().to_vec()),
                }
            }
        }
    }

    fn byte_code(&self, code_hash: &[u8]) -> Result<Vec<u8>, VmError> {
        self.byte_codes
            .get(code_hash)
            .cloned()
            .ok_or_else(|| VmError::execution("no such code in cache"))
    }
}
