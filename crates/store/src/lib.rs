//! Document-store boundary for mcp-dulce.
//!
//! This crate isolates everything that talks to the remote document
//! store behind the narrow [`DocumentStore`] trait: query a collection
//! with filters/order/limit, get one document by id, append a document.
//! Implementations:
//!
//! - [`FirestoreClient`]: the Firestore REST API over reqwest
//! - [`MemoryStore`]: in-memory double for tests
//!
//! The audit sink ([`AuditLogger`]) also lives here since it writes
//! through the same boundary.

pub mod audit;
pub mod error;
pub mod firestore;
pub mod memory;
pub mod query;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use audit::{AuditEntry, AuditLogger};
pub use error::StoreError;
pub use firestore::{FirestoreClient, FirestoreConfig};
pub use memory::MemoryStore;
pub use query::{CollectionQuery, FieldFilter, FilterOp};

/// One document: its id and its fields as plain JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: serde_json::Value,
}

/// Narrow read-mostly interface over the remote document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Run a filtered, ordered, bounded query over one collection.
    async fn query(&self, query: CollectionQuery) -> Result<Vec<Document>, StoreError>;

    /// Fetch a single document by id. `None` when it does not exist.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Append a document, returning its generated id.
    async fn add(&self, collection: &str, fields: serde_json::Value) -> Result<String, StoreError>;
}
