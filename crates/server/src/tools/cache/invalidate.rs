//! cache_invalidate tool implementation.
//!
//! Marks one resource dirty ahead of its TTL, or drops every entry.
//! Version counters survive either way.

use dulce_core::{Error, ResourceKind};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::handler::AppState;

/// Parameters for the cache_invalidate tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheInvalidateParams {
    /// Catalog URI of the resource to mark dirty.
    pub uri: Option<String>,

    /// Drop every entry instead of marking one dirty.
    pub all: Option<bool>,
}

/// Output from the cache_invalidate tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CacheInvalidateOutput {
    /// URIs marked dirty by this call.
    pub invalidated: Vec<String>,
    /// Whether the whole cache was dropped.
    pub cleared: bool,
}

/// Implementation of the cache_invalidate tool.
pub async fn invalidate_impl(state: &AppState, params: CacheInvalidateParams) -> Result<CallToolResult, McpError> {
    let output = match (params.uri, params.all.unwrap_or(false)) {
        (Some(_), true) => {
            return Err(Error::Validation("pass either uri or all, not both".to_string()).into());
        }
        (None, false) => {
            return Err(Error::Validation("one of uri or all is required".to_string()).into());
        }
        (Some(uri), false) => {
            let kind = ResourceKind::from_uri(&uri)
                .ok_or_else(|| Error::NotFound(format!("unknown resource: {uri}")))?;
            state.cache.mark_dirty(kind);
            CacheInvalidateOutput { invalidated: vec![uri], cleared: false }
        }
        (None, true) => {
            state.cache.clear();
            CacheInvalidateOutput { invalidated: Vec::new(), cleared: true }
        }
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::Internal(format!("failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dulce_core::AppConfig;
    use dulce_store::MemoryStore;
    use serde_json::json;
    use std::sync::Arc;

    fn state() -> AppState {
        AppState::new(AppConfig::default(), Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_invalidate_one_uri() {
        let state = state();
        state.cache.set(ResourceKind::ProductsIndex, json!([1]));

        let params = CacheInvalidateParams { uri: Some("dulce://products#index".into()), all: None };
        invalidate_impl(&state, params).await.unwrap();

        assert!(state.cache.get(ResourceKind::ProductsIndex).is_none());
        assert_eq!(state.cache.stats().dirty_count, 1);
    }

    #[tokio::test]
    async fn test_invalidate_all_preserves_versions() {
        let state = state();
        let before = state.cache.set(ResourceKind::ProductsIndex, json!([1])).data_version;

        let params = CacheInvalidateParams { uri: None, all: Some(true) };
        invalidate_impl(&state, params).await.unwrap();

        assert_eq!(state.cache.stats().entry_count, 0);
        let after = state.cache.set(ResourceKind::ProductsIndex, json!([2])).data_version;
        assert!(after > before);
    }

    #[tokio::test]
    async fn test_rejects_ambiguous_params() {
        let state = state();
        let both = CacheInvalidateParams { uri: Some("dulce://products#index".into()), all: Some(true) };
        assert!(invalidate_impl(&state, both).await.is_err());

        let neither = CacheInvalidateParams { uri: None, all: None };
        assert!(invalidate_impl(&state, neither).await.is_err());
    }

    #[tokio::test]
    async fn test_unknown_uri() {
        let state = state();
        let params = CacheInvalidateParams { uri: Some("dulce://nope".into()), all: None };
        assert!(invalidate_impl(&state, params).await.is_err());
    }
}
