//! cache_purge tool implementation.
//!
//! Removes expired entries from the flight cache.

use flightagg_core::{Error, FlightStore};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output from the cache_purge tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CachePurgeOutput {
    /// Number of expired entries removed.
    pub purged: u64,
}

/// Implementation of the cache_purge tool.
pub async fn purge_impl(store: &dyn FlightStore) -> Result<CallToolResult, McpError> {
    let purged = store.purge_expired().await?;

    tracing::info!(purged, "purged expired flight cache entries");

    let output = CachePurgeOutput { purged };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
