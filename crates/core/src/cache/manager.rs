//! Resource cache store and invalidation.
//!
//! One entry per resource kind, replaced wholesale on recomputation.
//! Expiry is checked lazily at read time; there is no background sweep.
//! The cache answers "do I have fresh data" — validator comparison
//! (If-None-Match against the entry's ETag) is the caller's job.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::etag;
use super::ttl::{ResourceKind, TtlPolicy};

/// Default soft budget for a single cached entry (400 KiB).
pub const DEFAULT_ENTRY_WARN_BYTES: usize = 400 * 1024;

/// One cached, already-projected read view.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Projected payload.
    pub data: Value,
    /// Content-derived token over the canonical serialization of `data`.
    pub etag: String,
    /// RFC 2822 timestamp of the last recomputation.
    pub last_modified: String,
    /// Monotone counter, incremented once per recomputation, never on hits.
    pub data_version: u64,
    /// Canonical serialized length; feeds the size alarm only.
    pub size_bytes: usize,
    computed_at: Instant,
}

impl CacheEntry {
    fn expired(&self, ttl: Duration) -> bool {
        self.computed_at.elapsed() > ttl
    }
}

/// Manifest row for one currently-live entry.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub etag: String,
    pub data_version: u64,
    pub last_modified: String,
}

/// Cache observability counters.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub entry_count: usize,
    pub total_size_bytes: usize,
    pub dirty_count: usize,
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<ResourceKind, CacheEntry>,
    dirty: HashSet<ResourceKind>,
    versions: HashMap<ResourceKind, u64>,
}

/// In-process store of computed resource payloads.
///
/// The maps live behind one mutex: the runtime is multi-threaded and
/// `get` followed by `set` is not atomic. Two racing writers for the same
/// kind may interleave — last writer wins, versions still only move
/// forward, and the data converges since computations are pure.
pub struct ResourceCache {
    inner: Mutex<CacheInner>,
    ttl: TtlPolicy,
    entry_warn_bytes: usize,
}

impl ResourceCache {
    pub fn new(ttl: TtlPolicy, entry_warn_bytes: usize) -> Self {
        Self { inner: Mutex::new(CacheInner::default()), ttl, entry_warn_bytes }
    }

    /// Return the live entry for a kind, if any.
    ///
    /// Absent when no entry exists, the kind is flagged dirty, or the
    /// entry outlived its TTL (evicted as a side effect). A hit never
    /// touches the version counter.
    pub fn get(&self, kind: ResourceKind) -> Option<CacheEntry> {
        let mut inner = self.inner.lock();

        if !inner.entries.contains_key(&kind) {
            return None;
        }

        if inner.dirty.contains(&kind) {
            tracing::debug!(uri = kind.uri(), "cache entry flagged dirty");
            return None;
        }

        let ttl = self.ttl.ttl_for(kind);
        if inner.entries[&kind].expired(ttl) {
            inner.entries.remove(&kind);
            tracing::debug!(uri = kind.uri(), "cache entry expired");
            return None;
        }

        inner.entries.get(&kind).cloned()
    }

    /// Store a freshly computed payload and return the new entry.
    ///
    /// Computes the ETag and size over the canonical serialization, stamps
    /// timestamps, bumps the per-kind version counter (counters are keyed
    /// independently of entry presence) and clears the dirty flag. An
    /// oversized payload is warned about, never rejected.
    pub fn set(&self, kind: ResourceKind, data: Value) -> CacheEntry {
        let canonical = etag::canonical_json(&data);
        let entry_etag = etag::etag_for(&canonical);
        let size_bytes = canonical.len();

        let mut inner = self.inner.lock();
        let version = inner.versions.entry(kind).or_insert(0);
        *version += 1;
        let data_version = *version;

        let entry = CacheEntry {
            data,
            etag: entry_etag,
            last_modified: chrono::Utc::now().to_rfc2822(),
            data_version,
            size_bytes,
            computed_at: Instant::now(),
        };

        inner.entries.insert(kind, entry.clone());
        inner.dirty.remove(&kind);
        drop(inner);

        tracing::debug!(uri = kind.uri(), etag = %entry.etag, size_bytes, data_version, "cache set");

        if size_bytes > self.entry_warn_bytes {
            tracing::warn!(
                uri = kind.uri(),
                size_bytes,
                budget_bytes = self.entry_warn_bytes,
                "cache entry exceeds size budget"
            );
        }

        entry
    }

    /// Flag a kind as known-stale ahead of its TTL. Idempotent.
    pub fn mark_dirty(&self, kind: ResourceKind) {
        self.inner.lock().dirty.insert(kind);
        tracing::debug!(uri = kind.uri(), "cache entry marked dirty");
    }

    /// Snapshot of validators for all currently-live entries.
    ///
    /// Kinds invalidated by TTL or dirty flag are omitted until reread.
    /// Read-only: nothing is evicted here.
    pub fn version_manifest(&self) -> BTreeMap<String, ManifestEntry> {
        let inner = self.inner.lock();
        inner
            .entries
            .iter()
            .filter(|(kind, entry)| {
                !inner.dirty.contains(kind) && !entry.expired(self.ttl.ttl_for(**kind))
            })
            .map(|(kind, entry)| {
                (
                    kind.uri().to_string(),
                    ManifestEntry {
                        etag: entry.etag.clone(),
                        data_version: entry.data_version,
                        last_modified: entry.last_modified.clone(),
                    },
                )
            })
            .collect()
    }

    /// Observability counters. No side effects.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        CacheStats {
            entry_count: inner.entries.len(),
            total_size_bytes: inner.entries.values().map(|e| e.size_bytes).sum(),
            dirty_count: inner.dirty.len(),
        }
    }

    /// Drop all entries and dirty flags.
    ///
    /// Version counters are kept: versions must never repeat for a kind
    /// within a process lifetime, even across a full clear.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.dirty.clear();
        tracing::debug!("cache cleared");
    }
}

impl Default for ResourceCache {
    fn default() -> Self {
        Self::new(TtlPolicy::default(), DEFAULT_ENTRY_WARN_BYTES)
    }
}
