//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use crate::tools::{get_impl, purge_impl};
use flightagg_client::Aggregator;
use flightagg_core::FlightStore;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::tool::{ToolCallContext, ToolRouter},
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for flight-aggregator.
#[derive(Clone)]
pub struct FlightsServer {
    tool_router: ToolRouter<Self>,
    aggregator: Arc<Aggregator>,
    store: Arc<dyn FlightStore>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl FlightsServer {
    /// Create a new server handler.
    ///
    /// `store` must be the same cache the aggregator's fetcher writes to.
    pub fn new(aggregator: Aggregator, store: Arc<dyn FlightStore>) -> Self {
        Self { tool_router: Self::tool_router(), aggregator: Arc::new(aggregator), store }
    }

    /// Aggregate flights from every configured source.
    #[tool(
        description = "Get flight offers merged from all configured sources. Cached per source; duplicates (same flight number and departure) are collapsed, later sources winning."
    )]
    async fn flights_get(&self) -> Result<CallToolResult, McpError> {
        get_impl(&self.aggregator).await
    }

    /// Drop expired cache entries.
    #[tool(description = "Remove expired entries from the flight cache. Returns the number of entries purged.")]
    async fn cache_purge(&self) -> Result<CallToolResult, McpError> {
        purge_impl(self.store.as_ref()).await
    }
}

impl ServerHandler for FlightsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "flight-aggregator".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
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
}
