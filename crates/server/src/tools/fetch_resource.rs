//! fetch_resource tool implementation.
//!
//! The conditional-read surface over the resource provider contract.

use dulce_core::Error;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::handler::AppState;
use crate::resources::{self, provider::ConditionalRead};

/// Parameters for the fetch_resource tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FetchResourceParams {
    /// Catalog URI of the resource to read.
    pub uri: String,

    /// Previously-seen ETag. A match yields a not-modified result.
    pub if_none_match: Option<String>,

    /// Accepted for HTTP parity; the ETag is authoritative.
    pub if_modified_since: Option<String>,
}

/// Implementation of the fetch_resource tool.
pub async fn fetch_impl(state: &AppState, params: FetchResourceParams) -> Result<CallToolResult, McpError> {
    if params.uri.trim().is_empty() {
        return Err(Error::Validation("uri cannot be empty".to_string()).into());
    }

    let cond = ConditionalRead { if_none_match: params.if_none_match, if_modified_since: params.if_modified_since };
    let read = resources::read_by_uri(state, &params.uri, &cond).await?;

    let json = serde_json::to_string_pretty(&read)
        .map_err(|e| Error::Internal(format!("failed to serialize resource read: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
