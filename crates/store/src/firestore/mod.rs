//! Firestore REST client.
//!
//! Talks to `firestore.googleapis.com/v1` with a bearer token. Queries go
//! through `:runQuery` with a structured query; single reads and appends
//! use the documents endpoints. The value envelope translation lives in
//! [`value`].

pub mod value;

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::StoreError;
use crate::query::{CollectionQuery, FilterOp};
use crate::{Document, DocumentStore};

const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Configuration for the Firestore REST client.
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub token: String,
    /// Override for emulators/tests; the production endpoint otherwise.
    pub base_url: Option<String>,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            token: String::new(),
            base_url: None,
            user_agent: "mcp-dulce/0.1".into(),
            timeout: Duration::from_secs(20),
        }
    }
}

/// Firestore-backed [`DocumentStore`].
#[derive(Debug, Clone)]
pub struct FirestoreClient {
    http: reqwest::Client,
    documents_url: String,
    token: String,
}

impl FirestoreClient {
    pub fn new(config: FirestoreConfig) -> Result<Self, StoreError> {
        if config.project_id.is_empty() {
            return Err(StoreError::Config("project_id cannot be empty".into()));
        }
        if config.token.is_empty() {
            return Err(StoreError::Config("token cannot be empty".into()));
        }

        let base = config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/');
        url::Url::parse(base).map_err(|e| StoreError::Config(format!("invalid base URL: {e}")))?;

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;

        let documents_url = format!("{base}/projects/{}/databases/(default)/documents", config.project_id);

        Ok(Self { http, documents_url, token: config.token })
    }

    fn check_status(status: reqwest::StatusCode) -> Result<(), StoreError> {
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(StoreError::Auth(format!("store rejected credentials (HTTP {})", status.as_u16())));
        }
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }
        Ok(())
    }

    fn structured_query(query: &CollectionQuery) -> Value {
        let mut body = json!({
            "from": [{"collectionId": query.collection}],
        });

        let filters: Vec<Value> = query
            .filters
            .iter()
            .map(|f| {
                let op = match f.op {
                    FilterOp::Eq => "EQUAL",
                    FilterOp::Gte => "GREATER_THAN_OR_EQUAL",
                };
                json!({
                    "fieldFilter": {
                        "field": {"fieldPath": f.field},
                        "op": op,
                        "value": value::encode(&f.value),
                    }
                })
            })
            .collect();

        match filters.len() {
            0 => {}
            1 => {
                body["where"] = filters.into_iter().next().unwrap_or_default();
            }
            _ => {
                body["where"] = json!({"compositeFilter": {"op": "AND", "filters": filters}});
            }
        }

        if let Some(field) = &query.order_by_desc {
            body["orderBy"] = json!([{"field": {"fieldPath": field}, "direction": "DESCENDING"}]);
        }
        if let Some(limit) = query.limit {
            body["limit"] = json!(limit);
        }

        json!({"structuredQuery": body})
    }

    fn document_from_wire(doc: &Value) -> Option<Document> {
        let name = doc.get("name")?.as_str()?;
        let id = name.rsplit('/').next()?.to_string();
        let fields = doc
            .get("fields")
            .and_then(Value::as_object)
            .map(value::decode_fields)
            .unwrap_or_default();
        Some(Document { id, fields: Value::Object(fields) })
    }
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    async fn query(&self, query: CollectionQuery) -> Result<Vec<Document>, StoreError> {
        let body = Self::structured_query(&query);
        tracing::debug!(collection = %query.collection, "store query");

        let response = self
            .http
            .post(format!("{}:runQuery", self.documents_url))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        Self::check_status(response.status())?;

        // runQuery streams one wrapper object per row; rows past the end
        // of the result set carry no "document" key.
        let rows: Vec<Value> = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        Ok(rows
            .iter()
            .filter_map(|row| row.get("document"))
            .filter_map(Self::document_from_wire)
            .collect())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let response = self
            .http
            .get(format!("{}/{collection}/{id}", self.documents_url))
            .bearer_auth(&self.token)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::check_status(response.status())?;

        let doc: Value = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        Ok(Self::document_from_wire(&doc))
    }

    async fn add(&self, collection: &str, fields: Value) -> Result<String, StoreError> {
        let encoded = fields
            .as_object()
            .map(value::encode_fields)
            .ok_or_else(|| StoreError::Decode("document fields must be an object".into()))?;

        let response = self
            .http
            .post(format!("{}/{collection}", self.documents_url))
            .bearer_auth(&self.token)
            .json(&json!({"fields": encoded}))
            .send()
            .await?;

        Self::check_status(response.status())?;

        let doc: Value = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        doc.get("name")
            .and_then(Value::as_str)
            .and_then(|name| name.rsplit('/').next())
            .map(|id| id.to_string())
            .ok_or_else(|| StoreError::Decode("create response carried no document name".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::FilterOp;

    #[test]
    fn test_new_requires_credentials() {
        let result = FirestoreClient::new(FirestoreConfig::default());
        assert!(matches!(result, Err(StoreError::Config(_))));
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        let config = FirestoreConfig {
            project_id: "dulce".into(),
            token: "t".into(),
            base_url: Some("not a url".into()),
            ..Default::default()
        };
        assert!(matches!(FirestoreClient::new(config), Err(StoreError::Config(_))));
    }

    #[test]
    fn test_structured_query_single_filter() {
        let query = CollectionQuery::new("movements")
            .filter("type", FilterOp::Eq, json!("SALE"))
            .order_desc("movementDate")
            .limit(500);

        let body = FirestoreClient::structured_query(&query);
        let sq = &body["structuredQuery"];
        assert_eq!(sq["from"][0]["collectionId"], "movements");
        assert_eq!(sq["where"]["fieldFilter"]["op"], "EQUAL");
        assert_eq!(sq["orderBy"][0]["direction"], "DESCENDING");
        assert_eq!(sq["limit"], 500);
    }

    #[test]
    fn test_structured_query_composite_filter() {
        let query = CollectionQuery::new("movements")
            .filter("type", FilterOp::Eq, json!("SALE"))
            .filter("movementDate", FilterOp::Gte, json!("2026-07-01T00:00:00Z"));

        let body = FirestoreClient::structured_query(&query);
        let filters = &body["structuredQuery"]["where"]["compositeFilter"]["filters"];
        assert_eq!(filters.as_array().unwrap().len(), 2);
        assert_eq!(filters[1]["fieldFilter"]["op"], "GREATER_THAN_OR_EQUAL");
    }

    #[test]
    fn test_document_from_wire() {
        let wire = json!({
            "name": "projects/dulce/databases/(default)/documents/products/p1",
            "fields": {"name": {"stringValue": "flour"}, "quantity": {"doubleValue": 3.0}}
        });

        let doc = FirestoreClient::document_from_wire(&wire).unwrap();
        assert_eq!(doc.id, "p1");
        assert_eq!(doc.fields["name"], "flour");
        assert_eq!(doc.fields["quantity"], 3.0);
    }

    #[test]
    fn test_document_from_wire_missing_name() {
        assert!(FirestoreClient::document_from_wire(&json!({"fields": {}})).is_none());
    }
}
