//! Client code for the flight aggregator.
//!
//! This crate provides the HTTP transport for upstream sources and the
//! validate, normalize, cache and merge pipeline used by the server.

pub mod fetch;
pub mod flights;

pub use fetch::{FetchClient, FetchConfig, FetchResponse, Transport};

pub use flights::{Aggregator, FetchPolicy, SourceFetcher, dedup_by_id, normalize, validate};
