//! Shared read-through orchestration for all resource providers.
//!
//! Flow: check cache → fetch from store and project on a miss → cache →
//! respond. The cache answers "do I have fresh data"; deciding whether
//! the caller already has it (If-None-Match against the entry's ETag)
//! happens here. A failed computation propagates without touching the
//! cache, so a good entry is never overwritten by a failure.

use std::future::Future;
use std::time::Instant;

use dulce_core::{CacheEntry, Error, ResourceKind};
use dulce_store::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::handler::AppState;

/// Upper bound on one index fetch.
pub const INDEX_LIMIT: u32 = 100;

/// Conditional-read validators supplied by the caller.
///
/// `if_modified_since` is accepted for HTTP parity but the ETag is
/// authoritative.
#[derive(Debug, Clone, Default)]
pub struct ConditionalRead {
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
}

/// Result of one resource read.
///
/// A not-modified result carries the validators but no payload body.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRead {
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    pub etag: String,
    pub last_modified: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_version: Option<u64>,
    pub not_modified: bool,
    pub cache_hit: bool,
}

impl ResourceRead {
    fn not_modified(uri: &str, entry: &CacheEntry) -> Self {
        Self {
            uri: uri.to_string(),
            payload: None,
            etag: entry.etag.clone(),
            last_modified: entry.last_modified.clone(),
            data_version: Some(entry.data_version),
            not_modified: true,
            cache_hit: true,
        }
    }

    fn full(uri: &str, entry: CacheEntry, cache_hit: bool) -> Self {
        Self {
            uri: uri.to_string(),
            payload: Some(entry.data),
            etag: entry.etag,
            last_modified: entry.last_modified,
            data_version: Some(entry.data_version),
            not_modified: false,
            cache_hit,
        }
    }
}

/// Map a store-boundary failure into the server taxonomy.
pub fn store_error(err: StoreError) -> Error {
    match err {
        StoreError::Auth(msg) => Error::Unauthorized(msg),
        other => Error::Internal(other.to_string()),
    }
}

/// Serialize a projection into a cacheable payload.
pub fn to_payload<T: Serialize>(value: &T) -> Result<Value, Error> {
    serde_json::to_value(value).map_err(|e| Error::Internal(format!("projection serialization failed: {e}")))
}

/// The canonical provider flow shared by every cacheable resource.
pub async fn read_through<F, Fut>(
    state: &AppState, kind: ResourceKind, cond: &ConditionalRead, compute: F,
) -> Result<ResourceRead, Error>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Value, Error>>,
{
    let uri = kind.uri();
    let start = Instant::now();

    if let Some(entry) = state.cache.get(kind) {
        if cond.if_none_match.as_deref() == Some(entry.etag.as_str()) {
            tracing::debug!(uri, etag = %entry.etag, "conditional read not modified");
            return Ok(ResourceRead::not_modified(uri, &entry));
        }
        tracing::debug!(uri, size_bytes = entry.size_bytes, "cache hit");
        return Ok(ResourceRead::full(uri, entry, true));
    }

    tracing::debug!(uri, "cache miss, computing from store");
    let data = compute().await?;
    let entry = state.cache.set(kind, data);

    if entry.size_bytes > state.config.payload_warn_bytes {
        tracing::warn!(
            uri,
            size_bytes = entry.size_bytes,
            ceiling_bytes = state.config.payload_warn_bytes,
            "resource payload exceeds size ceiling"
        );
    }

    let compute_ms = start.elapsed().as_millis() as u64;
    if compute_ms > state.config.slow_compute_ms {
        tracing::warn!(uri, compute_ms, "slow resource computation");
    }
    tracing::debug!(uri, cache_hit = false, compute_ms, size_bytes = entry.size_bytes, "resource computed");

    Ok(ResourceRead::full(uri, entry, false))
}
