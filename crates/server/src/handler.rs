//! MCP server handler implementation.
//!
//! This module defines the main server handler that routes tool calls and
//! resource reads to the appropriate implementations, and the application
//! state that composes the cache, the document store and the audit sink.

use std::sync::Arc;

use dulce_core::{AppConfig, ResourceCache};
use dulce_store::{AuditLogger, DocumentStore, FirestoreClient, FirestoreConfig};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        AnnotateAble, CallToolRequestParam, CallToolResult, Implementation, ListResourcesResult,
        ListToolsResult, PaginatedRequestParam, ProtocolVersion, RawResource, ReadResourceRequestParam,
        ReadResourceResult, ResourceContents, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

use crate::resources::{self, provider::ConditionalRead};
use crate::tools;

/// Shared state composing the cache, the store and the audit sink.
///
/// The cache is owned here, not process-global, so tests can build
/// isolated instances around an in-memory store.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub cache: Arc<ResourceCache>,
    pub store: Arc<dyn DocumentStore>,
    pub audit: AuditLogger,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn DocumentStore>) -> Self {
        let cache = Arc::new(ResourceCache::new(config.ttl_policy(), config.entry_warn_bytes));
        let audit = AuditLogger::new(store.clone());
        Self { config, cache, store, audit }
    }
}

/// The main MCP server handler for mcp-dulce.
#[derive(Clone)]
pub struct DulceServer {
    state: AppState,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl DulceServer {
    /// Create a server handler backed by the configured document store.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let (project_id, token) = config.require_store_credentials()?;
        let store = FirestoreClient::new(FirestoreConfig {
            project_id: project_id.to_string(),
            token: token.to_string(),
            base_url: config.store_base_url.clone(),
            user_agent: config.user_agent.clone(),
            timeout: config.timeout(),
        })?;

        Ok(Self::with_state(AppState::new(config, Arc::new(store))))
    }

    /// Create a server handler over pre-built state (tests, emulators).
    pub fn with_state(state: AppState) -> Self {
        Self { state, tool_router: Self::tool_router() }
    }

    #[tool(
        description = "Read a catalog resource with optional conditional-read validators. Returns the payload plus etag/lastModified/dataVersion, or a not-modified result when if_none_match still matches."
    )]
    async fn fetch_resource(
        &self, params: Parameters<tools::FetchResourceParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::fetch_resource::fetch_impl(&self.state, params.0).await
    }

    #[tool(
        description = "Get one recipe with its ingredient sections enriched with product names and measure units."
    )]
    async fn get_recipe_detail(
        &self, params: Parameters<tools::RecipeDetailParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::recipe_detail::detail_impl(&self.state, params.0).await
    }

    #[tool(
        description = "Get full person details including contact data. The read is PII-sensitive and audit-logged."
    )]
    async fn get_person_details(
        &self, params: Parameters<tools::PersonDetailParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::person_detail::detail_impl(&self.state, params.0).await
    }

    #[tool(description = "Report cache statistics: entry count, total size and dirty count.")]
    async fn cache_stats(
        &self, params: Parameters<tools::CacheStatsParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::cache::stats::stats_impl(&self.state, params.0).await
    }

    #[tool(description = "Invalidate one cached resource by uri, or the whole cache with all=true.")]
    async fn cache_invalidate(
        &self, params: Parameters<tools::CacheInvalidateParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::cache::invalidate::invalidate_impl(&self.state, params.0).await
    }
}

impl ServerHandler for DulceServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "mcp-dulce".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().enable_resources().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }

    async fn list_resources(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, rmcp::model::ErrorData> {
        let resources = resources::CATALOG
            .iter()
            .map(|entry| {
                let mut raw = RawResource::new(entry.uri, entry.name.to_string());
                raw.description = Some(entry.description.into());
                raw.mime_type = Some(entry.media_type.into());
                raw.no_annotation()
            })
            .collect();

        Ok(ListResourcesResult { meta: None, resources, next_cursor: None })
    }

    async fn read_resource(
        &self, request: ReadResourceRequestParam, _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, rmcp::model::ErrorData> {
        let read = resources::read_by_uri(&self.state, &request.uri, &ConditionalRead::default()).await?;
        let text = read
            .payload
            .map(|payload| serde_json::to_string_pretty(&payload).unwrap_or_default())
            .unwrap_or_default();

        Ok(ReadResourceResult { contents: vec![ResourceContents::text(text, request.uri)] })
    }
}
