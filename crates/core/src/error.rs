//! Unified error types for the flight aggregator.
//!
//! Every variant renders with a stable code prefix so log lines and tool
//! errors can be matched on without parsing free text.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

/// Unified error types for the flight aggregator.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters at the tool boundary.
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Upstream payload did not match the expected shape.
    #[error("VALIDATION_ERROR: {0}")]
    Validation(String),

    /// Transport-level failure talking to a source.
    #[error("NETWORK_ERROR: {0}")]
    Network(String),

    /// Fetch timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Fetch response too large.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// Source answered with a non-success status.
    #[error("HTTP_ERROR: status {0}")]
    HttpStatus(u16),

    /// Invalid URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Cache store unavailable or returned unreadable data.
    #[error("CACHE_ERROR: {0}")]
    Cache(String),

    /// Database operation failed.
    #[error("CACHE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("CACHE_ERROR: migration failed: {0}")]
    MigrationFailed(String),
}

impl Error {
    /// Whether another attempt at the same request could succeed.
    ///
    /// Connection failures, timeouts, 5xx, 408 and 429 are transient. Anything
    /// that would fail the same way again (bad URL, oversized body, other 4xx,
    /// malformed payload) is not.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Network(_) | Error::FetchTimeout(_) => true,
            Error::HttpStatus(status) => *status >= 500 || *status == 408 || *status == 429,
            _ => false,
        }
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::Validation(msg) => (-32000, msg.clone()),
            Error::Cache(msg) => (-32002, msg.clone()),
            Error::Database(e) => (-32002, e.to_string()),
            Error::MigrationFailed(msg) => (-32002, msg.clone()),
            Error::InvalidUrl(msg) => (-32003, msg.clone()),
            Error::FetchTimeout(msg) => (-32006, msg.clone()),
            Error::FetchTooLarge(msg) => (-32007, msg.clone()),
            Error::HttpStatus(status) => (-32008, format!("status {status}")),
            Error::Network(msg) => (-32009, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Validation("flights[0].price: expected a number".to_string());
        assert!(err.to_string().starts_with("VALIDATION_ERROR"));
        assert!(err.to_string().contains("flights[0].price"));

        let err = Error::HttpStatus(503);
        assert_eq!(err.to_string(), "HTTP_ERROR: status 503");
    }

    #[test]
    fn test_transient_classification() {
        assert!(Error::Network("connection reset".into()).is_transient());
        assert!(Error::FetchTimeout("20s".into()).is_transient());
        assert!(Error::HttpStatus(500).is_transient());
        assert!(Error::HttpStatus(429).is_transient());
        assert!(Error::HttpStatus(408).is_transient());

        assert!(!Error::HttpStatus(404).is_transient());
        assert!(!Error::InvalidUrl("ftp://x".into()).is_transient());
        assert!(!Error::FetchTooLarge("too big".into()).is_transient());
        assert!(!Error::Validation("bad".into()).is_transient());
    }

    #[test]
    fn test_error_to_mcp_error() {
        let err = Error::InvalidInput("bad".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32602);

        let mcp_err: McpError = Error::HttpStatus(502).into();
        assert_eq!(mcp_err.code.0, -32008);
    }
}
