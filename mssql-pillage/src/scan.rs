//! The scan pipeline.
//!
//! Per server: connect, list databases, scan each database's columns, count
//! rows per match, filter by the row-count threshold, write the report file.
//! Servers run through a bounded worker pool; everything inside one server
//! stays sequential over a single session.

use crate::sqlserver::SqlServerSession;
use futures::stream::{self, StreamExt};
use mssql_pillage_core::models::DatabaseFindings;
use mssql_pillage_core::{Credentials, Result, ScanConfig, ServerReport, report};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Tally of a whole run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    /// Servers whose report was written
    pub scanned: usize,
    /// Servers skipped after an error
    pub failed: usize,
    /// Findings across all written reports
    pub findings: usize,
}

/// Scans every target with up to `config.max_concurrency` workers and
/// writes one report file per server.
///
/// # Errors
///
/// Only output directory preparation is fatal here; per-server failures are
/// logged and that server is skipped.
pub async fn run(
    targets: &[String],
    credentials: &Credentials,
    config: &ScanConfig,
    output_dir: &Path,
    echo_findings: bool,
) -> Result<ScanSummary> {
    let started = Instant::now();
    report::prepare_output_dir(output_dir).await?;

    info!(
        "scanning {} server(s) (threads: {}, min rows: {})",
        targets.len(),
        config.max_concurrency,
        config.min_rows
    );

    let scans = targets.iter().map(|server| async move {
        let outcome =
            scan_server_to_file(server, credentials, config, output_dir, echo_findings).await;
        (server.as_str(), outcome)
    });

    let mut outcomes = stream::iter(scans).buffer_unordered(config.max_concurrency);

    let mut summary = ScanSummary::default();
    while let Some((server, outcome)) = outcomes.next().await {
        match outcome {
            Ok(findings) => {
                summary.scanned += 1;
                summary.findings += findings;
            }
            Err(e) => {
                warn!("skipping {server}: {e}");
                summary.failed += 1;
            }
        }
    }

    info!(
        "scan completed in {:.2}s: {} scanned, {} failed, {} finding(s)",
        started.elapsed().as_secs_f64(),
        summary.scanned,
        summary.failed,
        summary.findings
    );

    Ok(summary)
}

/// Runs the full pipeline against one server and returns its report.
///
/// The session lives only as long as this call and is dropped with it.
///
/// # Errors
///
/// Connection and database-list failures abandon the server. Column-scan
/// and row-count failures are logged inside and only skip their database
/// or match.
pub async fn scan_server(
    server: &str,
    credentials: &Credentials,
    config: &ScanConfig,
) -> Result<ServerReport> {
    let mut session = SqlServerSession::connect(server, credentials, config).await?;
    info!("connected to {server}");

    let databases = session.list_databases().await?;
    debug!("{server}: {} database(s) to scan", databases.len());

    let mut server_report = ServerReport::new(server);
    for database in databases {
        info!("{server}: querying database {database}");
        let matches = match session.scan_columns(&database).await {
            Ok(matches) => matches,
            Err(e) => {
                warn!("{server}: {e}");
                continue;
            }
        };

        let mut findings = Vec::new();
        for matched in matches {
            debug!(
                "{server}: matched column {}.{}.{}",
                matched.schema, matched.table, matched.column
            );
            let row_count = match session
                .count_rows(&database, &matched.schema, &matched.table)
                .await
            {
                Ok(count) => count,
                Err(e) => {
                    warn!("{server}: {e}");
                    continue;
                }
            };

            if config.should_report(row_count) {
                findings.push(matched.with_row_count(row_count));
            }
        }

        if !findings.is_empty() {
            server_report
                .databases
                .push(DatabaseFindings { database, findings });
        }
    }

    Ok(server_report)
}

async fn scan_server_to_file(
    server: &str,
    credentials: &Credentials,
    config: &ScanConfig,
    output_dir: &Path,
    echo_findings: bool,
) -> Result<usize> {
    let server_report = scan_server(server, credentials, config).await?;
    let path = report::write_report(output_dir, &server_report).await?;

    if echo_findings {
        for db in &server_report.databases {
            for finding in &db.findings {
                println!("{}", report::format_finding(&db.database, finding));
            }
        }
    }

    info!(
        "{server}: {} finding(s) written to {}",
        server_report.finding_count(),
        path.display()
    );
    Ok(server_report.finding_count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_starts_empty() {
        let summary = ScanSummary::default();
        assert_eq!(summary.scanned, 0);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.findings, 0);
    }
}
