//! Collection query shape shared by every store implementation.

use serde_json::Value;

/// Comparison operators supported at the store boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gte,
}

/// One field comparison.
#[derive(Debug, Clone)]
pub struct FieldFilter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

/// A filtered, optionally ordered and bounded query over one collection.
#[derive(Debug, Clone)]
pub struct CollectionQuery {
    pub collection: String,
    pub filters: Vec<FieldFilter>,
    /// Field to order by, descending. Queries that need stable output
    /// sort again after projection, so ascending order is never needed.
    pub order_by_desc: Option<String>,
    pub limit: Option<u32>,
}

impl CollectionQuery {
    pub fn new(collection: impl Into<String>) -> Self {
        Self { collection: collection.into(), filters: Vec::new(), order_by_desc: None, limit: None }
    }

    pub fn filter(mut self, field: impl Into<String>, op: FilterOp, value: Value) -> Self {
        self.filters.push(FieldFilter { field: field.into(), op, value });
        self
    }

    pub fn order_desc(mut self, field: impl Into<String>) -> Self {
        self.order_by_desc = Some(field.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}
