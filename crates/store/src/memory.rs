//! In-memory document store for tests.
//!
//! Evaluates the same query shape as the real client over seeded
//! documents. A failure toggle lets provider tests exercise the
//! cache-untouched-on-error contract, and a query counter lets
//! conditional-read tests assert that a 304 did zero recomputation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::query::{CollectionQuery, FieldFilter, FilterOp};
use crate::{Document, DocumentStore};

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    failing: AtomicBool,
    queries: AtomicU64,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one document.
    pub async fn insert(&self, collection: &str, id: &str, fields: Value) {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(Document { id: id.to_string(), fields });
    }

    /// Make every subsequent operation fail with a transport error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of `query` calls served so far.
    pub fn query_count(&self) -> u64 {
        self.queries.load(Ordering::SeqCst)
    }

    fn check_failing(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Transport("memory store set to fail".into()));
        }
        Ok(())
    }

    fn matches(filter: &FieldFilter, fields: &Value) -> bool {
        let Some(actual) = fields.get(&filter.field) else {
            return false;
        };
        match filter.op {
            FilterOp::Eq => actual == &filter.value,
            FilterOp::Gte => match (actual.as_f64(), filter.value.as_f64()) {
                (Some(a), Some(b)) => a >= b,
                // strings compare lexicographically, which is correct for
                // RFC 3339 timestamps
                _ => match (actual.as_str(), filter.value.as_str()) {
                    (Some(a), Some(b)) => a >= b,
                    _ => false,
                },
            },
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn query(&self, query: CollectionQuery) -> Result<Vec<Document>, StoreError> {
        self.check_failing()?;
        self.queries.fetch_add(1, Ordering::SeqCst);

        let collections = self.collections.read().await;
        let mut docs: Vec<Document> = collections
            .get(&query.collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| query.filters.iter().all(|f| Self::matches(f, &doc.fields)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(field) = &query.order_by_desc {
            docs.sort_by(|a, b| {
                let left = a.fields.get(field).and_then(Value::as_str).unwrap_or("");
                let right = b.fields.get(field).and_then(Value::as_str).unwrap_or("");
                right.cmp(left)
            });
        }

        if let Some(limit) = query.limit {
            docs.truncate(limit as usize);
        }

        Ok(docs)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.check_failing()?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == id))
            .cloned())
    }

    async fn add(&self, collection: &str, fields: Value) -> Result<String, StoreError> {
        self.check_failing()?;
        let id = format!("doc-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.insert(collection, &id, fields).await;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_query_filters_and_limit() {
        let store = MemoryStore::new();
        store
            .insert("movements", "m1", json!({"type": "SALE", "movementDate": "2026-07-20T10:00:00Z"}))
            .await;
        store
            .insert("movements", "m2", json!({"type": "PURCHASE", "movementDate": "2026-07-21T10:00:00Z"}))
            .await;
        store
            .insert("movements", "m3", json!({"type": "SALE", "movementDate": "2026-07-22T10:00:00Z"}))
            .await;

        let docs = store
            .query(CollectionQuery::new("movements").filter("type", FilterOp::Eq, json!("SALE")))
            .await
            .unwrap();
        assert_eq!(docs.len(), 2);

        let limited = store
            .query(
                CollectionQuery::new("movements")
                    .filter("type", FilterOp::Eq, json!("SALE"))
                    .order_desc("movementDate")
                    .limit(1),
            )
            .await
            .unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].id, "m3");
    }

    #[tokio::test]
    async fn test_gte_on_timestamps() {
        let store = MemoryStore::new();
        store.insert("movements", "old", json!({"movementDate": "2026-06-01T00:00:00Z"})).await;
        store.insert("movements", "new", json!({"movementDate": "2026-07-20T00:00:00Z"})).await;

        let docs = store
            .query(CollectionQuery::new("movements").filter(
                "movementDate",
                FilterOp::Gte,
                json!("2026-07-01T00:00:00Z"),
            ))
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "new");
    }

    #[tokio::test]
    async fn test_get_and_add() {
        let store = MemoryStore::new();
        assert!(store.get("persons", "c1").await.unwrap().is_none());

        store.insert("persons", "c1", json!({"name": "Ana"})).await;
        let doc = store.get("persons", "c1").await.unwrap().unwrap();
        assert_eq!(doc.fields["name"], "Ana");

        let id = store.add("audit_logs", json!({"action": "READ"})).await.unwrap();
        assert!(store.get("audit_logs", &id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_failing_toggle() {
        let store = MemoryStore::new();
        store.set_failing(true);
        assert!(store.query(CollectionQuery::new("products")).await.is_err());
        assert_eq!(store.query_count(), 0);

        store.set_failing(false);
        assert!(store.query(CollectionQuery::new("products")).await.is_ok());
        assert_eq!(store.query_count(), 1);
    }
}
