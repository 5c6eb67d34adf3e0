//! Cache-related MCP tools.
//!
//! This module provides tools for maintaining the flight cache.

pub mod purge;

pub use purge::{CachePurgeOutput, purge_impl};
