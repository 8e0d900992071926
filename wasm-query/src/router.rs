//! Dispatches path based queries to their handlers.

use tracing::trace;
use wasm_core_types::CodeId;
use wasm_primitives::{AddressCodec, ContractAddress};

use crate::config::WasmConfig;
use crate::core::code::{query_code, query_code_list};
use crate::core::context::QueryContext;
use crate::core::contract::{
    query_contract_history, query_contract_info, query_contracts_by_code,
    query_inactive_contracts, query_is_inactive_contract,
};
use crate::core::state::{query_all_state, query_raw, query_smart};
use crate::error::QueryError;
use crate::types::{QueryKind, StateMethod};

/// A fully parsed query, ready to be executed against a context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryRequest {
    ContractInfo(ContractAddress),
    ContractsByCode(CodeId),
    ContractState {
        contract: ContractAddress,
        method: StateMethod,
    },
    Code(CodeId),
    ListCode,
    ContractHistory(ContractAddress),
    InactiveContracts,
    InactiveContract(ContractAddress),
}

impl QueryRequest {
    /// Parses a query path. No store is touched while parsing.
    pub fn parse<S: AsRef<str>>(codec: &AddressCodec, path: &[S]) -> Result<Self, QueryError> {
        let kind: QueryKind = path
            .first()
            .ok_or_else(|| QueryError::unknown_request("empty query path"))?
            .as_ref()
            .parse()?;

        let request = match kind {
            QueryKind::ContractInfo => Self::ContractInfo(parse_address(codec, path, kind)?),
            QueryKind::ListContractsByCode => Self::ContractsByCode(parse_code_id(path, kind)?),
            QueryKind::ContractState => {
                if path.len() < 3 {
                    return Err(QueryError::unknown_request("unknown data query endpoint"));
                }
                let contract = parse_address(codec, path, kind)?;
                let method = path[2].as_ref().parse()?;
                Self::ContractState { contract, method }
            }
            QueryKind::Code => Self::Code(parse_code_id(path, kind)?),
            QueryKind::ListCode => Self::ListCode,
            QueryKind::ContractHistory => Self::ContractHistory(parse_address(codec, path, kind)?),
            QueryKind::InactiveContracts => Self::InactiveContracts,
            QueryKind::InactiveContract => {
                Self::InactiveContract(parse_address(codec, path, kind)?)
            }
        };

        Ok(request)
    }

    pub fn kind(&self) -> QueryKind {
        match self {
            Self::ContractInfo(_) => QueryKind::ContractInfo,
            Self::ContractsByCode(_) => QueryKind::ListContractsByCode,
            Self::ContractState { .. } => QueryKind::ContractState,
            Self::Code(_) => QueryKind::Code,
            Self::ListCode => QueryKind::ListCode,
            Self::ContractHistory(_) => QueryKind::ContractHistory,
            Self::InactiveContracts => QueryKind::InactiveContracts,
            Self::InactiveContract(_) => QueryKind::InactiveContract,
        }
    }
}

fn argument<S: AsRef<str>>(path: &[S], kind: QueryKind) -> Result<&str, QueryError> {
    path.get(1)
        .map(AsRef::as_ref)
        .ok_or_else(|| QueryError::unknown_request(format!("missing argument of {kind}")))
}

fn parse_address<S: AsRef<str>>(
    codec: &AddressCodec,
    path: &[S],
    kind: QueryKind,
) -> Result<ContractAddress, QueryError> {
    let address = argument(path, kind)?;

    codec
        .parse(address)
        .map_err(|error| QueryError::InvalidAddress {
            address: address.to_string(),
            error,
        })
}

fn parse_code_id<S: AsRef<str>>(path: &[S], kind: QueryKind) -> Result<CodeId, QueryError> {
    let value = argument(path, kind)?;

    value
        .parse()
        .map_err(|error| QueryError::InvalidArgument {
            value: value.to_string(),
            error,
        })
}

/// Routes query paths to the wasm query handlers.
///
/// The router holds no state of its own; the address codec and the
/// configuration are borrowed from the host for its lifetime.
#[derive(Clone, Copy, Debug)]
pub struct QueryRouter<'c> {
    codec: &'c AddressCodec,
    config: &'c WasmConfig,
}

impl<'c> QueryRouter<'c> {
    pub fn new(codec: &'c AddressCodec, config: &'c WasmConfig) -> Self {
        Self { codec, config }
    }

    pub fn codec(&self) -> &AddressCodec {
        self.codec
    }

    pub fn config(&self) -> &WasmConfig {
        self.config
    }

    /// Answers the query named by `path`. `data` is the request body and is
    /// only read by contract state queries.
    ///
    /// An empty result is a successful answer with nothing to report.
    pub fn route<Ctx, S>(&self, ctx: &Ctx, path: &[S], data: &[u8]) -> Result<Vec<u8>, QueryError>
    where
        Ctx: QueryContext,
        S: AsRef<str>,
    {
        let request = QueryRequest::parse(self.codec, path)?;

        trace!("Got wasm query request: {:?}", request);

        self.execute(ctx, request, data)
    }

    /// Answers an already parsed query.
    pub fn execute<Ctx>(
        &self,
        ctx: &Ctx,
        request: QueryRequest,
        data: &[u8],
    ) -> Result<Vec<u8>, QueryError>
    where
        Ctx: QueryContext,
    {
        match request {
            QueryRequest::ContractInfo(contract) => query_contract_info(ctx, &contract)?.into_json(),
            QueryRequest::ContractsByCode(code_id) => {
                query_contracts_by_code(ctx, code_id)?.into_json()
            }
            QueryRequest::ContractState { contract, method } => match method {
                StateMethod::Smart => {
                    query_smart(ctx, &contract, data, self.config.smart_query_gas_limit)
                }
                StateMethod::Raw => query_raw(ctx, &contract, data),
                StateMethod::All => query_all_state(ctx, &contract),
            },
            QueryRequest::Code(code_id) => query_code(ctx, code_id)?.into_json(),
            QueryRequest::ListCode => query_code_list(ctx)?.into_json(),
            QueryRequest::ContractHistory(contract) => {
                query_contract_history(ctx, &contract)?.into_json()
            }
            QueryRequest::InactiveContracts => query_inactive_contracts(ctx)?.into_json(),
            QueryRequest::InactiveContract(contract) => {
                query_is_inactive_contract(ctx, &contract)?.into_json()
            }
        }
    }
}
