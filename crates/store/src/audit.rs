//! Audit sink for PII-sensitive reads.
//!
//! Entries are appended to the store's audit collection. The sink is
//! fire-and-forget: a failed write is logged locally and swallowed, so
//! audit trouble can never break a successful read.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::DocumentStore;

const AUDIT_COLLECTION: &str = "audit_logs";

/// One structured audit record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    /// RFC 3339 timestamp.
    pub timestamp: String,
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    pub accessed_fields: Vec<String>,
    pub requester: String,
    pub purpose: String,
    pub success: bool,
}

/// Writes audit entries through the document-store boundary.
#[derive(Clone)]
pub struct AuditLogger {
    store: Arc<dyn DocumentStore>,
}

impl AuditLogger {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Record a PII access. Never fails the caller.
    pub async fn log_pii_access(
        &self, action: &str, resource_type: &str, resource_id: &str, accessed_fields: &[&str], requester: &str,
        purpose: &str,
    ) {
        let entry = AuditEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            action: action.to_string(),
            resource_type: resource_type.to_string(),
            resource_id: resource_id.to_string(),
            accessed_fields: accessed_fields.iter().map(|f| f.to_string()).collect(),
            requester: requester.to_string(),
            purpose: purpose.to_string(),
            success: true,
        };

        let fields = match serde_json::to_value(&entry) {
            Ok(fields) => fields,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize audit entry");
                return;
            }
        };

        match self.store.add(AUDIT_COLLECTION, fields).await {
            Ok(id) => {
                tracing::debug!(audit_id = %id, action, resource_id, "audit entry written");
            }
            Err(e) => {
                tracing::warn!(error = %e, action, resource_id, "audit write failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use crate::query::CollectionQuery;

    #[tokio::test]
    async fn test_logs_entry() {
        let store = Arc::new(MemoryStore::new());
        let audit = AuditLogger::new(store.clone());

        audit
            .log_pii_access("READ_PERSON_PII", "person", "c1", &["name", "phones"], "mcp-client", "customer service")
            .await;

        let entries = store.query(CollectionQuery::new("audit_logs")).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].fields["action"], "READ_PERSON_PII");
        assert_eq!(entries[0].fields["resourceId"], "c1");
        assert_eq!(entries[0].fields["success"], true);
    }

    #[tokio::test]
    async fn test_sink_failure_swallowed() {
        let store = Arc::new(MemoryStore::new());
        store.set_failing(true);
        let audit = AuditLogger::new(store.clone());

        // must not panic or surface the failure
        audit
            .log_pii_access("READ_PERSON_PII", "person", "c1", &["name"], "mcp-client", "customer service")
            .await;
    }
}
