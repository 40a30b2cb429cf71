//! Report file output.
//!
//! One plain-text file per server, named exactly after the server identifier
//! (no extension), one space-separated line per retained finding. A scanned
//! server always gets a file, even when nothing was retained.

use crate::error::{PillageError, Result};
use crate::models::{ColumnFinding, ServerReport};
use std::path::{Path, PathBuf};

/// Formats one report line:
/// `<database> <catalog> <schema> <table> <column> <rowCount>`.
#[must_use]
pub fn format_finding(database: &str, finding: &ColumnFinding) -> String {
    format!(
        "{} {} {} {} {} {}",
        database,
        finding.catalog,
        finding.schema,
        finding.table,
        finding.column,
        finding.row_count
    )
}

/// Renders the whole report body, databases in discovery order.
///
/// No header, no trailing metadata; an empty report renders as an empty
/// string.
#[must_use]
pub fn render(report: &ServerReport) -> String {
    let mut body = String::new();
    for db in &report.databases {
        for finding in &db.findings {
            body.push_str(&format_finding(&db.database, finding));
            body.push('\n');
        }
    }
    body
}

/// Creates the output directory if it does not exist yet.
///
/// # Errors
///
/// Failure here is fatal to the run.
pub async fn prepare_output_dir(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        PillageError::io(
            format!("failed to prepare output directory {}", dir.display()),
            e,
        )
    })
}

/// Writes the server's report file into the output directory.
///
/// The filename is the literal server identifier.
///
/// # Errors
///
/// An I/O failure here is local to this server; the caller logs it and
/// moves on to the next one.
pub async fn write_report(output_dir: &Path, report: &ServerReport) -> Result<PathBuf> {
    let path = output_dir.join(&report.server);
    tokio::fs::write(&path, render(report)).await.map_err(|e| {
        PillageError::io(format!("failed to write report {}", path.display()), e)
    })?;
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{ColumnMatch, DatabaseFindings};

    fn sample_report() -> ServerReport {
        let matched = ColumnMatch {
            catalog: "CustomerDB".to_string(),
            schema: "dbo".to_string(),
            table: "Accounts".to_string(),
            column: "CreditCardNumber".to_string(),
        };

        let mut report = ServerReport::new("10.0.0.5");
        report.databases.push(DatabaseFindings {
            database: "CustomerDB".to_string(),
            findings: vec![matched.with_row_count(500)],
        });
        report
    }

    #[test]
    fn test_format_finding_line() {
        let report = sample_report();
        let line = format_finding(
            &report.databases[0].database,
            &report.databases[0].findings[0],
        );
        assert_eq!(line, "CustomerDB CustomerDB dbo Accounts CreditCardNumber 500");
    }

    #[test]
    fn test_render_empty_report() {
        let report = ServerReport::new("sql01");
        assert_eq!(render(&report), "");
    }

    #[test]
    fn test_render_has_one_line_per_finding() {
        let mut report = sample_report();
        report.databases.push(DatabaseFindings {
            database: "HR".to_string(),
            findings: vec![
                ColumnMatch {
                    catalog: "HR".to_string(),
                    schema: "dbo".to_string(),
                    table: "Employees".to_string(),
                    column: "HomeAddress".to_string(),
                }
                .with_row_count(42),
            ],
        });

        let body = render(&report);
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "CustomerDB CustomerDB dbo Accounts CreditCardNumber 500");
        assert_eq!(lines[1], "HR HR dbo Employees HomeAddress 42");
    }

    #[tokio::test]
    async fn test_write_report_filename_is_server_identifier() {
        let dir = tempfile::tempdir().unwrap();
        let report = sample_report();

        let path = write_report(dir.path(), &report).await.unwrap();

        assert_eq!(path.file_name().unwrap(), "10.0.0.5");
        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(
            contents,
            "CustomerDB CustomerDB dbo Accounts CreditCardNumber 500\n"
        );
    }

    #[tokio::test]
    async fn test_write_report_empty_still_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let report = ServerReport::new("sql01");

        let path = write_report(dir.path(), &report).await.unwrap();

        assert!(path.exists());
        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(contents.is_empty());
    }

    #[tokio::test]
    async fn test_prepare_output_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("mssql-pillage-output");

        prepare_output_dir(&target).await.unwrap();
        prepare_output_dir(&target).await.unwrap();
        assert!(target.is_dir());
    }
}
