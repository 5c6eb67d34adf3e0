//! Core types and shared functionality for the flight aggregator.
//!
//! This crate provides:
//! - The normalized [`Flight`] model
//! - Per-source flight cache stores (in-memory and SQLite)
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod flight;

pub use cache::{CacheDb, FlightStore, MemoryCache};
pub use config::{AppConfig, CacheBackend, ConfigError};
pub use error::Error;
pub use flight::Flight;
