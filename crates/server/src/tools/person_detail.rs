//! get_person_details tool implementation.
//!
//! The one read view that serves contact data. Every call writes a
//! structured audit entry through the fire-and-forget sink; an audit
//! failure never fails the read.

use dulce_core::{
    Error,
    model::{Person, Phone},
};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::handler::AppState;
use crate::resources::provider::store_error;

const DEFAULT_PURPOSE: &str = "business operations - customer service";
const PII_FIELDS: &[&str] = &["name", "lastName", "phones", "addresses"];

/// Parameters for the get_person_details tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PersonDetailParams {
    /// Person document id.
    pub person_id: String,

    /// Reason for the access, recorded in the audit trail.
    pub purpose: Option<String>,
}

/// Audit context echoed back with the payload.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessInfo {
    /// RFC 3339 timestamp of the read.
    pub accessed_at: String,
    pub purpose: String,
}

/// Output from the get_person_details tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonDetailOutput {
    pub id: String,
    pub name: String,
    pub last_name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub phones: Vec<Phone>,
    pub addresses: Vec<String>,
    pub audit: AccessInfo,
}

/// Implementation of the get_person_details tool.
pub async fn detail_impl(state: &AppState, params: PersonDetailParams) -> Result<CallToolResult, McpError> {
    if params.person_id.trim().is_empty() {
        return Err(Error::Validation("person_id cannot be empty".to_string()).into());
    }

    let doc = state
        .store
        .get("persons", &params.person_id)
        .await
        .map_err(store_error)?
        .ok_or_else(|| Error::NotFound(format!("person {}", params.person_id)))?;
    let person = Person::from_fields(doc.id, doc.fields);

    let purpose = params.purpose.unwrap_or_else(|| DEFAULT_PURPOSE.to_string());
    state
        .audit
        .log_pii_access("READ_PERSON_PII", "person", &person.id, PII_FIELDS, "mcp-client", &purpose)
        .await;

    let output = PersonDetailOutput {
        id: person.id.clone(),
        name: person.name.clone(),
        last_name: person.last_name.clone(),
        kind: person.kind.clone(),
        phones: person.phones.clone(),
        addresses: person.addresses.clone(),
        audit: AccessInfo { accessed_at: chrono::Utc::now().to_rfc3339(), purpose },
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::Internal(format!("failed to serialize person details: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
