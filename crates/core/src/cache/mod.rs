//! In-memory resource cache with conditional-read support.
//!
//! This module provides the single authoritative in-process store of
//! computed read views, keyed by resource kind. It supports:
//!
//! - Content-derived ETags over a canonical JSON serialization
//! - Per-resource TTL expiry with lazy eviction at read time
//! - Explicit dirty-marking ahead of TTL
//! - Monotone per-resource version counters that survive eviction and clear
//! - A soft size-budget alarm (never an eviction policy)

pub mod etag;
pub mod manager;
pub mod ttl;

pub use crate::Error;

pub use manager::{CacheEntry, CacheStats, ManifestEntry, ResourceCache};
pub use ttl::{ResourceKind, TtlPolicy};
