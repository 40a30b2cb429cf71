//! Catalog query construction.
//!
//! These queries touch server and database metadata only, never user data,
//! except for the row count which is a bare `COUNT_BIG(*)` over a fully
//! qualified table.

use crate::patterns::SENSITIVE_PATTERNS;

/// Server-wide database enumeration, excluding the four system databases.
pub const DATABASE_LIST_SQL: &str = "\
SELECT name \
FROM master.dbo.sysdatabases \
WHERE name NOT IN ('master', 'tempdb', 'model', 'msdb')";

/// Cap on the number of column matches returned per database.
///
/// The truncation is silent; the server simply stops at this many rows.
pub const COLUMN_SCAN_CAP: u32 = 1000;

/// Bracket-quotes a SQL Server identifier, doubling any closing bracket.
#[must_use]
pub fn quote_ident(ident: &str) -> String {
    format!("[{}]", ident.replace(']', "]]"))
}

/// Builds the column scan query for one database.
///
/// Matches `LOWER(COLUMN_NAME)` against every entry in
/// [`SENSITIVE_PATTERNS`], OR-joined so a column matching several patterns
/// yields a single row, capped at [`COLUMN_SCAN_CAP`] rows.
#[must_use]
pub fn column_scan_sql(database: &str) -> String {
    let filters = SENSITIVE_PATTERNS
        .iter()
        .map(|pattern| format!("LOWER(COLUMN_NAME) LIKE '%{pattern}%'"))
        .collect::<Vec<_>>()
        .join(" OR ");

    format!(
        "SELECT TOP {COLUMN_SCAN_CAP} TABLE_CATALOG, TABLE_SCHEMA, TABLE_NAME, COLUMN_NAME \
         FROM {}.INFORMATION_SCHEMA.COLUMNS \
         WHERE {filters}",
        quote_ident(database)
    )
}

/// Builds the row count query for one fully qualified table.
#[must_use]
pub fn row_count_sql(database: &str, schema: &str, table: &str) -> String {
    format!(
        "SELECT COUNT_BIG(*) FROM {}.{}.{}",
        quote_ident(database),
        quote_ident(schema),
        quote_ident(table)
    )
}
