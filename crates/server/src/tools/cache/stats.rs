//! cache_stats tool implementation.
//!
//! Observability only: counters plus the validator manifest of all live
//! entries. No side effects.

use std::collections::BTreeMap;

use dulce_core::{CacheStats, Error, cache::ManifestEntry};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::handler::AppState;

/// Parameters for the cache_stats tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheStatsParams {}

/// Output from the cache_stats tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsOutput {
    pub stats: CacheStats,
    pub manifest: BTreeMap<String, ManifestEntry>,
}

/// Implementation of the cache_stats tool.
pub async fn stats_impl(state: &AppState, _params: CacheStatsParams) -> Result<CallToolResult, McpError> {
    let output = CacheStatsOutput { stats: state.cache.stats(), manifest: state.cache.version_manifest() };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::Internal(format!("failed to serialize cache stats: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dulce_core::{AppConfig, ResourceKind};
    use dulce_store::MemoryStore;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_stats_reports_entries() {
        let state = AppState::new(AppConfig::default(), Arc::new(MemoryStore::new()));
        state.cache.set(ResourceKind::ProductsIndex, json!([1, 2]));

        let result = stats_impl(&state, CacheStatsParams {}).await.unwrap();
        let content = serde_json::to_value(&result.content[0]).unwrap();
        let output: CacheStatsOutput = serde_json::from_str(content["text"].as_str().unwrap()).unwrap();

        assert_eq!(output.stats.entry_count, 1);
        assert!(output.manifest.contains_key("dulce://products#index"));
    }
}
