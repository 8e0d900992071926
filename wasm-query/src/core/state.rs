//! Executors reading a contract's state: smart, raw and full dumps.
//!
//! Only smart queries run contract code, so only they are gas bounded. Raw
//! lookups and full dumps read the store directly and are bounded by the
//! store's own read cost alone.

use tracing::debug;
use wasm_core_types::RawContractMessage;
use wasm_primitives::ContractAddress;

use crate::core::context::QueryContext;
use crate::error::QueryError;
use crate::gas::{with_query_gas_meter, Gas};

/// Runs the contract's query entry point with `data` as message, bounded by
/// a fresh meter of `gas_limit`. Returns the VM output verbatim.
pub fn query_smart<Ctx>(
    ctx: &Ctx,
    contract: &ContractAddress,
    data: &[u8],
    gas_limit: Gas,
) -> Result<Vec<u8>, QueryError>
where
    Ctx: QueryContext,
{
    let msg = RawContractMessage::new(data);

    msg.validate_basic().map_err(QueryError::ValidationFailure)?;

    let result = with_query_gas_meter(gas_limit, |gas_meter| {
        ctx.query_smart(contract, &msg, gas_meter)
    })?;

    debug!(%contract, len = result.len(), "smart query answered");

    Ok(result)
}

/// Returns the value stored under `key`, or an empty result if absent.
pub fn query_raw<Ctx>(ctx: &Ctx, contract: &ContractAddress, key: &[u8]) -> Result<Vec<u8>, QueryError>
where
    Ctx: QueryContext,
{
    Ok(ctx.query_raw(contract, key)?.unwrap_or_default())
}

/// Returns every key/value entry of the contract as a compact JSON array,
/// in store key order. The complete list is collected before encoding.
pub fn query_all_state<Ctx>(ctx: &Ctx, contract: &ContractAddress) -> Result<Vec<u8>, QueryError>
where
    Ctx: QueryContext,
{
    let models = ctx.contract_state(contract)?;

    debug!(%contract, entries = models.len(), "dumping contract state");

    Ok(serde_json::to_vec(&models)?)
}
