//! Version manifest resource.
//!
//! Snapshot of the validators of every live cache entry, for cheap bulk
//! staleness checks. Computed per request and never cached — caching a
//! staleness check would defeat it.

use chrono::Utc;
use dulce_core::{Error, cache::etag};
use serde_json::json;

use super::provider::ResourceRead;
use crate::handler::AppState;

pub const URI: &str = "dulce://version-manifest";

pub async fn manifest(state: &AppState) -> Result<ResourceRead, Error> {
    let now = Utc::now();
    let payload = json!({
        "manifest": state.cache.version_manifest(),
        "stats": state.cache.stats(),
        "generatedAt": now.to_rfc3339(),
    });

    Ok(ResourceRead {
        uri: URI.to_string(),
        etag: etag::compute_etag(&payload),
        last_modified: now.to_rfc2822(),
        payload: Some(payload),
        data_version: None,
        not_modified: false,
        cache_hit: false,
    })
}
