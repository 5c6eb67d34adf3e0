//! MCP tool implementations.
//!
//! This module contains all tools exposed by the flight-aggregator server.

pub mod cache;
pub mod flights;

pub use cache::purge_impl;
pub use flights::get_impl;
