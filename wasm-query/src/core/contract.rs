//! Provides handlers for contract metadata queries.

use wasm_core_types::{CodeId, ContractCodeHistoryEntry, ContractInfoResponse};
use wasm_primitives::ContractAddress;

use crate::core::context::QueryContext;
use crate::error::QueryError;
use crate::types::QueryResponse;

/// Queries for the metadata of a contract.
pub fn query_contract_info<Ctx>(
    ctx: &Ctx,
    contract: &ContractAddress,
) -> Result<QueryResponse<ContractInfoResponse>, QueryError>
where
    Ctx: QueryContext,
{
    let response = ctx.contract_info(contract)?.map(|mut info| {
        info.redact();
        ContractInfoResponse {
            address: contract.to_string(),
            contract_info: info,
        }
    });

    Ok(response.into())
}

/// Queries for the addresses of all contracts instantiated from `code_id`.
pub fn query_contracts_by_code<Ctx>(
    ctx: &Ctx,
    code_id: CodeId,
) -> Result<QueryResponse<Vec<String>>, QueryError>
where
    Ctx: QueryContext,
{
    let contracts = ctx
        .contracts_by_code(code_id)?
        .iter()
        .map(ToString::to_string)
        .collect();

    Ok(QueryResponse::from_list(contracts))
}

/// Queries for the code history of a contract. The update position of every
/// entry is cleared.
pub fn query_contract_history<Ctx>(
    ctx: &Ctx,
    contract: &ContractAddress,
) -> Result<QueryResponse<Vec<ContractCodeHistoryEntry>>, QueryError>
where
    Ctx: QueryContext,
{
    let mut history = ctx.contract_history(contract)?;

    history.iter_mut().for_each(ContractCodeHistoryEntry::redact);

    Ok(QueryResponse::Content(history))
}

/// Queries for the addresses of all inactive contracts.
pub fn query_inactive_contracts<Ctx>(ctx: &Ctx) -> Result<QueryResponse<Vec<String>>, QueryError>
where
    Ctx: QueryContext,
{
    let contracts = ctx
        .inactive_contracts()?
        .iter()
        .map(ToString::to_string)
        .collect();

    Ok(QueryResponse::from_list(contracts))
}

/// Queries whether a contract is inactive.
pub fn query_is_inactive_contract<Ctx>(
    ctx: &Ctx,
    contract: &ContractAddress,
) -> Result<QueryResponse<bool>, QueryError>
where
    Ctx: QueryContext,
{
    Ok(QueryResponse::Content(ctx.is_inactive_contract(contract)?))
}
