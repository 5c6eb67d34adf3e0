//! flights_get tool implementation.
//!
//! Runs one aggregation over every configured source.

use flightagg_client::Aggregator;
use flightagg_core::{Error, Flight};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output from the flights_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FlightsGetOutput {
    /// Deduplicated flights from all sources, in source order.
    pub flights: Vec<Flight>,
    /// Number of flights returned.
    pub count: usize,
}

/// Implementation of the flights_get tool.
///
/// Never fails because of a source: unreachable or malformed sources simply
/// contribute no flights.
pub async fn get_impl(aggregator: &Aggregator) -> Result<CallToolResult, McpError> {
    let flights = aggregator.get_flights().await;

    tracing::info!(sources = aggregator.sources().len(), count = flights.len(), "served flights");

    let count = flights.len();
    let output = FlightsGetOutput { flights, count };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize flights: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
