//! Content-derived ETag computation.
//!
//! ETags are a pure function of the payload's canonical serialized form:
//! identical payloads hash identically, and any content change produces a
//! different token. Canonicalization relies on `serde_json::Map` keeping
//! object keys sorted (the default BTreeMap backing); the `preserve_order`
//! feature must stay disabled anywhere in the workspace or conditional
//! reads break on spurious ETag churn.

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Serialize a payload to its canonical JSON form.
pub fn canonical_json(data: &Value) -> String {
    serde_json::to_string(data).unwrap_or_default()
}

/// Compute the ETag for an already-canonicalized serialization.
pub fn etag_for(canonical: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("\"{}\"", hex::encode(hasher.finalize()))
}

/// Compute the ETag for a payload.
pub fn compute_etag(data: &Value) -> String {
    etag_for(&canonical_json(data))
}
