//! flight-aggregator server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use flightagg_client::{Aggregator, FetchClient, FetchConfig, FetchPolicy, SourceFetcher};
use flightagg_core::{AppConfig, CacheBackend, CacheDb, FlightStore, MemoryCache};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;

    tracing::info!(
        sources = config.endpoints.len(),
        backend = ?config.cache_backend,
        retry_count = config.retry_count,
        cache_ttl_secs = config.cache_ttl_secs,
        "Starting flight-aggregator server on stdio transport"
    );

    let store: Arc<dyn FlightStore> = match config.cache_backend {
        CacheBackend::Memory => Arc::new(MemoryCache::new()),
        CacheBackend::Sqlite => Arc::new(CacheDb::open(&config.db_path).await?),
    };

    let client = FetchClient::new(FetchConfig::from(&config))?;
    let fetcher = SourceFetcher::new(Arc::new(client), store.clone(), FetchPolicy::from(&config));
    let aggregator = Aggregator::new(fetcher, config.endpoints.clone());

    let handler = handler::FlightsServer::new(aggregator, store);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
