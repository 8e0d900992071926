use typed_builder::TypedBuilder;
use wasm_core_types::{
    AbsoluteTxPosition, CodeId, ContractCodeHistoryEntry, ContractCodeHistoryOperationType,
    ContractInfo, RawContractMessage,
};

use crate::utils::dummies::dummy_account;

/// Configuration of a contract instance.
#[derive(TypedBuilder, Debug)]
#[builder(build_method(into = ContractInfo))]
pub struct ContractInfoConfig {
    #[builder(default = CodeId::new(1))]
    pub code_id: CodeId,
    #[builder(default = dummy_account(1), setter(into))]
    pub creator: String,
    #[builder(default, setter(into))]
    pub admin: String,
    #[builder(default = "contract".to_string(), setter(into))]
    pub label: String,
    #[builder(default = Some(AbsoluteTxPosition::new(1, 0)))]
    pub created: Option<AbsoluteTxPosition>,
    #[builder(default, setter(into))]
    pub ibc_port_id: String,
}

impl From<ContractInfoConfig> for ContractInfo {
    fn from(config: ContractInfoConfig) -> Self {
        ContractInfo {
            code_id: config.code_id,
            creator: config.creator,
            admin: config.admin,
            label: config.label,
            created: config.created,
            ibc_port_id: config.ibc_port_id,
        }
    }
}

/// Configuration of a code history entry. Entries carry an update position
/// by default, as stored entries do.
#[derive(TypedBuilder, Debug)]
#[builder(build_method(into = ContractCodeHistoryEntry))]
pub struct HistoryEntryConfig {
    #[builder(default = ContractCodeHistoryOperationType::Init)]
    pub operation: ContractCodeHistoryOperationType,
    #[builder(default = CodeId::new(1))]
    pub code_id: CodeId,
    #[builder(default = Some(AbsoluteTxPosition::new(1, 0)))]
    pub updated: Option<AbsoluteTxPosition>,
    #[builder(default = RawContractMessage::new(br#"{"init":{}}"#.to_vec()))]
    pub msg: RawContractMessage,
}

impl From<HistoryEntryConfig> for ContractCodeHistoryEntry {
    fn from(config: HistoryEntryConfig) -> Self {
        ContractCodeHistoryEntry {
            operation: config.operation,
            code_id: config.code_id,
            updated: config.updated,
            msg: config.msg,
        }
    }
}
