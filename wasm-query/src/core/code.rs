//! Provides handlers for uploaded code queries.

use wasm_core_types::{CodeId, CodeInfoResponse, CodeResponse};

use crate::core::context::QueryContext;
use crate::error::QueryError;
use crate::types::QueryResponse;

/// Queries for the metadata and bytecode of `code_id`.
pub fn query_code<Ctx>(ctx: &Ctx, code_id: CodeId) -> Result<QueryResponse<CodeResponse>, QueryError>
where
    Ctx: QueryContext,
{
    if code_id.is_zero() {
        return Ok(QueryResponse::NoContent);
    }

    let Some(info) = ctx.code_info(code_id)? else {
        return Ok(QueryResponse::NoContent);
    };

    let data = ctx.byte_code(&info)?;

    Ok(QueryResponse::Content(CodeResponse {
        info: CodeInfoResponse::new(code_id, info),
        data,
    }))
}

/// Queries for the metadata of all uploaded code, in code id order.
pub fn query_code_list<Ctx>(ctx: &Ctx) -> Result<QueryResponse<Vec<CodeInfoResponse>>, QueryError>
where
    Ctx: QueryContext,
{
    let infos = ctx
        .code_infos()?
        .into_iter()
        .map(|(code_id, info)| CodeInfoResponse::new(code_id, info))
        .collect();

    Ok(QueryResponse::from_list(infos))
}
