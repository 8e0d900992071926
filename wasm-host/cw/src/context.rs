//! Query context over a CosmWasm key/value store.

use cosmwasm_std::{Order, Record, Storage};
use ibc_proto::Protobuf;
use tracing::trace;
use wasm_core_types::error::{DecodingError, HostError};
use wasm_core_types::{
    CodeId, CodeInfo, ContractCodeHistoryEntry, ContractInfo, Model, RawContractMessage,
};
use wasm_primitives::{AddressCodec, ContractAddress};
use wasm_query::core::context::{ContractVm, QueryContext, VmError};
use wasm_query::config::WasmConfig;
use wasm_query::gas::{Gas, GasMeter, GasRegister};

use crate::keys::{
    code_key, contract_code_history_prefix, contract_key, contract_store_key,
    contract_store_prefix, contracts_by_code_prefix, inactive_contract_key, prefix_end,
    split_length_prefixed, CODE_KEY_PREFIX, INACTIVE_CONTRACT_PREFIX,
};

/// Gas descriptor of the contract setup charge.
pub const SETUP_QUERY_DESCRIPTOR: &str = "Loading CosmWasm module: query";

/// Gas descriptor of the VM gas charged back after a smart query.
pub const VM_QUERY_DESCRIPTOR: &str = "wasm contract";

/// Serves [`QueryContext`] out of a read-only store snapshot, delegating
/// contract execution to a [`ContractVm`].
pub struct CwQueryContext<'a, V: ContractVm> {
    storage: &'a dyn Storage,
    vm: &'a V,
    codec: &'a AddressCodec,
    gas_register: GasRegister,
}

impl<'a, V: ContractVm> CwQueryContext<'a, V> {
    /// Creates a context whose gas prices come from `config`.
    pub fn new(
        storage: &'a dyn Storage,
        vm: &'a V,
        codec: &'a AddressCodec,
        config: &WasmConfig,
    ) -> Self {
        Self {
            storage,
            vm,
            codec,
            gas_register: GasRegister::from(config),
        }
    }

    pub fn codec(&self) -> &AddressCodec {
        self.codec
    }

    /// Iterates over all records whose key starts with `prefix`, in
    /// ascending key order, with the prefix stripped from the keys.
    fn prefix_range<'s>(&'s self, prefix: &[u8]) -> Box<dyn Iterator<Item = Record> + 's> {
        let end = prefix_end(prefix);
        let prefix_len = prefix.len();

        let records = self
            .storage
            .range(Some(prefix), end.as_deref(), Order::Ascending)
            .map(move |(key, value)| {
                let key = key.get(prefix_len..).map(<[u8]>::to_vec).unwrap_or_default();
                (key, value)
            });

        Box::new(records)
    }

    fn address_from_key(&self, key: &[u8]) -> Result<ContractAddress, HostError> {
        let (bytes, _) = split_length_prefixed(key).ok_or_else(|| HostError::FailedToParseData {
            description: format!("malformed address key `{key:?}`"),
        })?;

        self.codec
            .from_bytes(bytes)
            .map_err(|e| HostError::FailedToParseData {
                description: e.to_string(),
            })
    }
}

fn decoding_error(e: impl ToString) -> HostError {
    DecodingError::Protobuf {
        description: e.to_string(),
    }
    .into()
}

impl<'a, V: ContractVm> QueryContext for CwQueryContext<'a, V> {
    fn contract_info(&self, contract: &ContractAddress) -> Result<Option<ContractInfo>, HostError> {
        self.storage
            .get(&contract_key(contract))
            .map(|bytes| ContractInfo::decode_vec(&bytes).map_err(decoding_error))
            .transpose()
    }

    fn contracts_by_code(&self, code_id: CodeId) -> Result<Vec<ContractAddress>, HostError> {
        // keys are `height (8) | tx index (8) | length prefixed address`
        self.prefix_range(&contracts_by_code_prefix(code_id))
            .map(|(key, _)| match key.get(16..) {
                Some(address) => self.address_from_key(address),
                None => Err(HostError::FailedToParseData {
                    description: format!("malformed contract by code key `{key:?}`"),
                }),
            })
            .collect()
    }

    fn contract_history(
        &self,
        contract: &ContractAddress,
    ) -> Result<Vec<ContractCodeHistoryEntry>, HostError> {
        self.prefix_range(&contract_code_history_prefix(contract))
            .map(|(_, value)| ContractCodeHistoryEntry::decode_vec(&value).map_err(decoding_error))
            .collect()
    }

    fn inactive_contracts(&self) -> Result<Vec<ContractAddress>, HostError> {
        self.prefix_range(INACTIVE_CONTRACT_PREFIX)
            .map(|(key, _)| self.address_from_key(&key))
            .collect()
    }

    fn is_inactive_contract(&self, contract: &ContractAddress) -> Result<bool, HostError> {
        Ok(self.storage.get(&inactive_contract_key(contract)).is_some())
    }

    fn contract_state(&self, contract: &ContractAddress) -> Result<Vec<Model>, HostError> {
        let models = self
            .prefix_range(&contract_store_prefix(contract))
            .map(|(key, value)| Model::new(key, value))
            .collect();

        Ok(models)
    }

    fn query_raw(&self, contract: &ContractAddress, key: &[u8]) -> Result<Option<Vec<u8>>, HostError> {
        Ok(self.storage.get(&contract_store_key(contract, key)))
    }

    fn query_smart(
        &self,
        contract: &ContractAddress,
        msg: &RawContractMessage,
        gas_meter: &mut GasMeter,
    ) -> Result<Vec<u8>, VmError> {
        let contract_info =
            self.contract_info(contract)?
                .ok_or_else(|| VmError::ContractNotFound {
                    address: contract.to_string(),
                })?;

        let code_info = self
            .code_info(contract_info.code_id)?
            .ok_or(VmError::CodeNotFound {
                code_id: contract_info.code_id,
            })?;

        gas_meter.consume(
            self.gas_register.setup_contract_cost(),
            SETUP_QUERY_DESCRIPTOR,
        )?;

        // saturates for limits beyond what the VM can count
        let vm_limit = self
            .gas_register
            .to_vm_gas(gas_meter.remaining())
            .unwrap_or(Gas::MAX);
        let mut vm_meter = GasMeter::new(vm_limit);

        trace!(
            %contract,
            code_id = %contract_info.code_id,
            vm_limit,
            "calling contract query entry point"
        );

        let result = self
            .vm
            .query_smart(contract, &code_info.code_hash, msg, &mut vm_meter);

        gas_meter.consume(
            self.gas_register.from_vm_gas(vm_meter.consumed()),
            VM_QUERY_DESCRIPTOR,
        )?;

        result
    }

    fn code_info(&self, code_id: CodeId) -> Result<Option<CodeInfo>, HostError> {
        self.storage
            .get(&code_key(code_id))
            .map(|bytes| CodeInfo::decode_vec(&bytes).map_err(decoding_error))
            .transpose()
    }

    fn code_infos(&self) -> Result<Vec<(CodeId, CodeInfo)>, HostError> {
        self.prefix_range(CODE_KEY_PREFIX)
            .map(|(key, value)| {
                let id: [u8; 8] = key.as_slice().try_into().map_err(|_| {
                    HostError::FailedToParseData {
                        description: format!("malformed code key `{key:?}`"),
                    }
                })?;
                let info = CodeInfo::decode_vec(&value).map_err(decoding_error)?;
                Ok((CodeId::new(u64::from_be_bytes(id)), info))
            })
            .collect()
    }

    fn byte_code(&self, code_info: &CodeInfo) -> Result<Vec<u8>, VmError> {
        self.vm.byte_code(&code_info.code_hash)
    }
}

#[cfg(test)]
mod tests {
    use cosmwasm_std::MemoryStorage;
    use test_log::test;
    use wasm_core_types::{AbsoluteTxPosition, AccessConfig, ContractCodeHistoryOperationType};
    use wasm_query::config::WasmConfig;
    use wasm_query::error::QueryError;
    use wasm_query::gas::GasError;
    use wasm_query::router::QueryRouter;

    use super::*;
    use crate::writer::CwStoreWriter;

    const CODE_HASH: &[u8] = &[0xc0; 32];

    /// Answers every query with the message it received, after charging
    /// a fixed amount of gas.
    struct EchoVm {
        cost: u64,
    }

    impl ContractVm for EchoVm {
        fn query_smart(
            &self,
            _contract: &ContractAddress,
            code_hash: &[u8],
            msg: &RawContractMessage,
            gas_meter: &mut GasMeter,
        ) -> Result<Vec<u8>, VmError> {
            assert_eq!(code_hash, CODE_HASH);
            gas_meter.consume(self.cost, "echo")?;
            Ok(msg.as_bytes().to_vec())
        }

        fn byte_code(&self, code_hash: &[u8]) -> Result<Vec<u8>, VmError> {
            assert_eq!(code_hash, CODE_HASH);
            Ok(b"\0asm".to_vec())
        }
    }

    fn codec() -> AddressCodec {
        AddressCodec::new("wasm").unwrap()
    }

    fn address(byte: u8, len: usize) -> ContractAddress {
        codec().from_bytes(vec![byte; len]).unwrap()
    }

    fn contract_info(code_id: u64, created: AbsoluteTxPosition) -> ContractInfo {
        ContractInfo {
            code_id: CodeId::new(code_id),
            creator: "creator".to_string(),
            admin: String::new(),
            label: "label".to_string(),
            created: Some(created),
            ibc_port_id: String::new(),
        }
    }

    fn code_info() -> CodeInfo {
        CodeInfo {
            code_hash: CODE_HASH.to_vec(),
            creator: "creator".to_string(),
            instantiate_config: AccessConfig::everybody(),
        }
    }

    fn seeded_storage() -> (MemoryStorage, ContractAddress, ContractAddress) {
        let mut storage = MemoryStorage::new();
        let first = address(0x02, 20);
        let second = address(0x01, 8);

        let mut writer = CwStoreWriter::new(&mut storage);
        writer.save_code_info(CodeId::new(1), code_info());
        writer.save_code_info(CodeId::new(256), code_info());
        // created later, but its address key sorts first
        writer.save_contract(&second, contract_info(1, AbsoluteTxPosition::new(7, 0)));
        writer.save_contract(&first, contract_info(1, AbsoluteTxPosition::new(3, 4)));

        writer.set_state(&first, b"b", b"2");
        writer.set_state(&first, b"a", b"1");
        writer.set_state(&second, b"a", b"other");

        for (operation, height) in [
            (ContractCodeHistoryOperationType::Init, 3),
            (ContractCodeHistoryOperationType::Migrate, 9),
        ] {
            writer.append_history_entry(
                &first,
                ContractCodeHistoryEntry {
                    operation,
                    code_id: CodeId::new(1),
                    updated: Some(AbsoluteTxPosition::new(height, 0)),
                    msg: RawContractMessage::new(br#"{"count":1}"#.to_vec()),
                },
            );
        }

        writer.set_inactive(&second);

        (storage, first, second)
    }

    #[test]
    fn test_contract_info() {
        let (storage, first, _) = seeded_storage();
        let (codec, vm) = (codec(), EchoVm { cost: 0 });
        let ctx = CwQueryContext::new(&storage, &vm, &codec, &WasmConfig::default());

        let info = ctx.contract_info(&first).unwrap().unwrap();
        assert_eq!(info.created, Some(AbsoluteTxPosition::new(3, 4)));
        assert!(ctx.contract_info(&address(0x09, 20)).unwrap().is_none());
    }

    #[test]
    fn test_contracts_by_code_follow_creation_order() {
        let (storage, first, second) = seeded_storage();
        let (codec, vm) = (codec(), EchoVm { cost: 0 });
        let ctx = CwQueryContext::new(&storage, &vm, &codec, &WasmConfig::default());

        assert_eq!(
            ctx.contracts_by_code(CodeId::new(1)).unwrap(),
            vec![first, second]
        );
        assert!(ctx.contracts_by_code(CodeId::new(2)).unwrap().is_empty());
    }

    #[test]
    fn test_contract_state_is_ordered_and_isolated() {
        let (storage, first, second) = seeded_storage();
        let (codec, vm) = (codec(), EchoVm { cost: 0 });
        let ctx = CwQueryContext::new(&storage, &vm, &codec, &WasmConfig::default());

        assert_eq!(
            ctx.contract_state(&first).unwrap(),
            vec![Model::new(b"a".to_vec(), b"1".to_vec()), Model::new(b"b".to_vec(), b"2".to_vec())]
        );
        assert_eq!(
            ctx.contract_state(&second).unwrap(),
            vec![Model::new(b"a".to_vec(), b"other".to_vec())]
        );
        assert_eq!(ctx.query_raw(&first, b"b").unwrap(), Some(b"2".to_vec()));
        assert_eq!(ctx.query_raw(&first, b"c").unwrap(), None);
    }

    #[test]
    fn test_code_infos_ascending() {
        let (storage, _, _) = seeded_storage();
        let (codec, vm) = (codec(), EchoVm { cost: 0 });
        let ctx = CwQueryContext::new(&storage, &vm, &codec, &WasmConfig::default());

        let ids: Vec<u64> = ctx
            .code_infos()
            .unwrap()
            .into_iter()
            .map(|(id, _)| id.value())
            .collect();
        assert_eq!(ids, vec![1, 256]);
        let info = ctx.code_info(CodeId::new(1)).unwrap().unwrap();
        assert_eq!(ctx.byte_code(&info).unwrap(), b"\0asm".to_vec());
        assert!(ctx.code_info(CodeId::new(2)).unwrap().is_none());
    }

    #[test]
    fn test_history_and_inactive_contracts() {
        let (storage, first, second) = seeded_storage();
        let (codec, vm) = (codec(), EchoVm { cost: 0 });
        let ctx = CwQueryContext::new(&storage, &vm, &codec, &WasmConfig::default());

        let history = ctx.contract_history(&first).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].operation, ContractCodeHistoryOperationType::Init);
        assert_eq!(history[1].operation, ContractCodeHistoryOperationType::Migrate);

        assert_eq!(ctx.inactive_contracts().unwrap(), vec![second.clone()]);
        assert!(ctx.is_inactive_contract(&second).unwrap());
        assert!(!ctx.is_inactive_contract(&first).unwrap());
    }

    #[test]
    fn test_query_smart_charges_setup_cost() {
        let (storage, first, _) = seeded_storage();
        let (codec, vm) = (codec(), EchoVm { cost: 5 });
        let config = WasmConfig {
            gas_multiplier: 1,
            instance_cost: 100,
            ..WasmConfig::default()
        };
        let ctx = CwQueryContext::new(&storage, &vm, &codec, &config);
        let msg = RawContractMessage::new(br#"{"ping":{}}"#.to_vec());

        let mut meter = GasMeter::new(1_000);
        assert_eq!(
            ctx.query_smart(&first, &msg, &mut meter).unwrap(),
            msg.as_bytes().to_vec()
        );
        assert_eq!(meter.consumed(), 105);

        let mut meter = GasMeter::new(50);
        assert!(matches!(
            ctx.query_smart(&first, &msg, &mut meter),
            Err(VmError::OutOfGas(GasError::OutOfGas { .. }))
        ));

        let mut meter = GasMeter::new(1_000);
        assert!(matches!(
            ctx.query_smart(&address(0x09, 20), &msg, &mut meter),
            Err(VmError::ContractNotFound { .. })
        ));
    }

    #[test]
    fn test_query_smart_converts_vm_gas() {
        let (storage, first, _) = seeded_storage();
        let codec = codec();
        let config = WasmConfig {
            gas_multiplier: 1_000,
            instance_cost: 100,
            ..WasmConfig::default()
        };
        let msg = RawContractMessage::new(br#"{"ping":{}}"#.to_vec());

        // 5_000 vm gas is 5 chain gas
        let vm = EchoVm { cost: 5_000 };
        let ctx = CwQueryContext::new(&storage, &vm, &codec, &config);
        let mut meter = GasMeter::new(10_000);
        ctx.query_smart(&first, &msg, &mut meter).unwrap();
        assert_eq!(meter.consumed(), 105);

        // the vm budget is the remaining 9_900 chain gas, scaled
        let vm = EchoVm { cost: 9_900_001 };
        let ctx = CwQueryContext::new(&storage, &vm, &codec, &config);
        let mut meter = GasMeter::new(10_000);
        assert!(matches!(
            ctx.query_smart(&first, &msg, &mut meter),
            Err(VmError::OutOfGas(_))
        ));
        assert_eq!(meter.consumed(), 10_000);

        let vm = EchoVm { cost: 9_900_000 };
        let ctx = CwQueryContext::new(&storage, &vm, &codec, &config);
        let mut meter = GasMeter::new(10_000);
        assert!(ctx.query_smart(&first, &msg, &mut meter).is_ok());
        assert_eq!(meter.consumed(), 10_000);
    }

    #[test]
    fn test_query_smart_reports_store_failure() {
        let (mut storage, first, _) = seeded_storage();
        storage.set(&contract_key(&first), b"not a contract");
        let (codec, vm) = (codec(), EchoVm { cost: 0 });
        let config = WasmConfig::default();
        let ctx = CwQueryContext::new(&storage, &vm, &codec, &config);
        let router = QueryRouter::new(&codec, &config);
        let first = first.to_string();

        let err = router
            .route(&ctx, &["contract-state", first.as_str(), "smart"], br#"{"ping":{}}"#)
            .unwrap_err();
        assert!(matches!(err, QueryError::Host(_)));
    }

    #[test]
    fn test_router_over_store() {
        let (storage, first, _) = seeded_storage();
        let (codec, vm) = (codec(), EchoVm { cost: 0 });
        let config = WasmConfig::default();
        let ctx = CwQueryContext::new(&storage, &vm, &codec, &WasmConfig::default());
        let router = QueryRouter::new(&codec, &config);
        let first = first.to_string();

        let history = router
            .route(&ctx, &["contract-history", first.as_str()], &[])
            .unwrap();
        let history: serde_json::Value = serde_json::from_slice(&history).unwrap();
        assert_eq!(history.as_array().map(Vec::len), Some(2));
        assert!(history
            .as_array()
            .unwrap()
            .iter()
            .all(|entry| entry.get("updated").is_none()));

        let info = router
            .route(&ctx, &["contract-info", first.as_str()], &[])
            .unwrap();
        let info: serde_json::Value = serde_json::from_slice(&info).unwrap();
        assert_eq!(info["address"], first.as_str());
        assert!(info.get("created").is_none());

        let all = router
            .route(&ctx, &["contract-state", first.as_str(), "all"], &[])
            .unwrap();
        assert_eq!(
            all,
            br#"[{"key":"61","value":"MQ=="},{"key":"62","value":"Mg=="}]"#.to_vec()
        );

        let missing = router
            .route(&ctx, &["code", "42"], &[])
            .unwrap();
        assert!(missing.is_empty());

        assert!(matches!(
            router.route(&ctx, &["contract-state", first.as_str(), "smart"], b"{}"),
            Err(QueryError::ValidationFailure(_))
        ));
    }
}
