//! Result model for a scan.
//!
//! Everything here is scoped to a single server: a [`ServerReport`] is built
//! fresh, flushed to disk, and dropped before the next server starts. The
//! per-server aggregation is an ordered list rather than a map so report
//! output is deterministic.

/// A column whose name matched a sensitive pattern.
///
/// Identified by its (catalog, schema, table, column) tuple as returned by
/// the database's information schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMatch {
    /// `TABLE_CATALOG` as reported by the catalog
    pub catalog: String,
    /// `TABLE_SCHEMA`
    pub schema: String,
    /// `TABLE_NAME`
    pub table: String,
    /// `COLUMN_NAME`
    pub column: String,
}

impl ColumnMatch {
    /// Enriches the match with its owning table's row count.
    #[must_use]
    pub fn with_row_count(self, row_count: u64) -> ColumnFinding {
        ColumnFinding {
            catalog: self.catalog,
            schema: self.schema,
            table: self.table,
            column: self.column,
            row_count,
        }
    }
}

/// A [`ColumnMatch`] that passed the row-count filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFinding {
    /// `TABLE_CATALOG` as reported by the catalog
    pub catalog: String,
    /// `TABLE_SCHEMA`
    pub schema: String,
    /// `TABLE_NAME`
    pub table: String,
    /// `COLUMN_NAME`
    pub column: String,
    /// Row count of the owning table at scan time
    pub row_count: u64,
}

/// Retained findings for one database, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseFindings {
    /// Database the scan was scoped to
    pub database: String,
    /// Findings that passed the row-count filter
    pub findings: Vec<ColumnFinding>,
}

/// All retained findings for one server.
///
/// Databases appear in catalog return order; findings in discovery order.
#[derive(Debug, Clone)]
pub struct ServerReport {
    /// The literal string used to connect; also names the report file
    pub server: String,
    /// Per-database findings, empty databases omitted
    pub databases: Vec<DatabaseFindings>,
}

impl ServerReport {
    /// Creates an empty report for the given server.
    #[must_use]
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            databases: Vec::new(),
        }
    }

    /// Total number of findings across all databases.
    #[must_use]
    pub fn finding_count(&self) -> usize {
        self.databases.iter().map(|db| db.findings.len()).sum()
    }

    /// Whether the scan retained anything at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.databases.is_empty()
    }
}
