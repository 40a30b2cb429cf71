//! Error types for the scan pipeline.
//!
//! Fatal conditions (bad invocation, output directory preparation) abort the
//! run; everything else is scoped to a server, database, or table and the
//! caller logs and moves on. Error messages never carry credentials.

use std::time::Duration;
use thiserror::Error;

/// Main error type for scan operations.
#[derive(Debug, Error)]
pub enum PillageError {
    /// Connecting to a server failed
    #[error("connection to {server} failed")]
    Connection {
        server: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Connecting to a server did not complete within the configured timeout
    #[error("connection to {server} timed out after {timeout:?}")]
    ConnectionTimeout { server: String, timeout: Duration },

    /// A catalog query (database list or column scan) failed
    #[error("catalog query failed: {context}")]
    Catalog {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Counting rows in a matched table failed
    #[error("row count failed for {table}")]
    RowCount {
        table: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A query returned a shape the pipeline cannot use
    #[error("query result unusable: {context}")]
    QueryResult { context: String },

    /// Invalid invocation or option combination
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// I/O operation failed
    #[error("I/O operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results with [`PillageError`]
pub type Result<T> = std::result::Result<T, PillageError>;

impl PillageError {
    /// Creates a connection error for the given server.
    pub fn connection_failed<E>(server: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Connection {
            server: server.into(),
            source: Box::new(error),
        }
    }

    /// Creates a catalog query error with context.
    pub fn catalog_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Catalog {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates a row count error for the given qualified table.
    pub fn row_count_failed<E>(table: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::RowCount {
            table: table.into(),
            source: Box::new(error),
        }
    }

    /// Creates an error for a query result missing an expected column.
    pub fn query_result(context: impl Into<String>) -> Self {
        Self::QueryResult {
            context: context.into(),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = PillageError::configuration("need a server or an input file");
        assert!(error.to_string().contains("need a server or an input file"));

        let error = PillageError::query_result("missing COLUMN_NAME");
        assert!(error.to_string().contains("missing COLUMN_NAME"));
    }

    #[test]
    fn test_connection_timeout_display() {
        let error = PillageError::ConnectionTimeout {
            server: "10.0.0.5".to_string(),
            timeout: Duration::from_secs(30),
        };
        let message = error.to_string();
        assert!(message.contains("10.0.0.5"));
        assert!(message.contains("timed out"));
    }

    #[test]
    fn test_source_chain_preserved() {
        let io_error = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let error = PillageError::connection_failed("sql01", io_error);

        assert!(error.to_string().contains("sql01"));
        assert!(std::error::Error::source(&error).is_some());
    }
}
