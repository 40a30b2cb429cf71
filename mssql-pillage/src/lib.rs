//! Library surface for the mssql-pillage binary.
//!
//! Exposes the CLI definition and the scan pipeline so tests can exercise
//! them; the binary entry point is in `main.rs`.

pub mod scan;
pub mod sqlserver;

use clap::Parser;
use mssql_pillage_core::ScanConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line interface for the scanner.
#[derive(Parser, Debug)]
#[command(name = "mssql-pillage")]
#[command(about = "Find sensitive-looking columns across SQL Server estates")]
#[command(version)]
pub struct Cli {
    /// SQL Server to connect to
    #[arg(long, alias = "server", value_name = "HOST")]
    pub host: Option<String>,

    /// File of newline-delimited SQL Servers to connect to
    #[arg(long, value_name = "FILE")]
    pub input_file: Option<PathBuf>,

    /// Directory to write per-server reports to
    #[arg(long, value_name = "DIR", default_value = "mssql-pillage-output")]
    pub output: PathBuf,

    /// Username to authenticate as
    #[arg(long, value_name = "USER")]
    pub user: Option<String>,

    /// Domain qualifier for the login (authenticates as DOMAIN\user)
    #[arg(long, value_name = "DOMAIN")]
    pub domain: Option<String>,

    /// Password for the login; prompted for when omitted
    #[arg(
        long = "pass",
        value_name = "PASSWORD",
        env = "MSSQL_PILLAGE_PASSWORD",
        hide_env_values = true
    )]
    pub pass: Option<String>,

    /// Port SQL Server is on
    #[arg(long, default_value_t = 1433)]
    pub port: u16,

    /// Connection timeout in seconds
    #[arg(long, default_value_t = 30, value_name = "SECONDS")]
    pub timeout: u64,

    /// Minimum row count a table must reach before it is reported
    #[arg(long, default_value_t = 0, value_name = "ROWS")]
    pub row_count: u64,

    /// Number of servers to scan in parallel
    #[arg(long, default_value_t = 1)]
    pub threads: usize,

    /// Increase verbosity (-v, -vv) and echo report lines to the console
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Scan configuration derived from the parsed flags.
    #[must_use]
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig::new()
            .with_port(self.port)
            .with_connect_timeout(Duration::from_secs(self.timeout))
            .with_min_rows(self.row_count)
            .with_max_concurrency(self.threads)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["mssql-pillage", "--host", "sql01"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("mssql-pillage-output"));
        assert_eq!(cli.port, 1433);
        assert_eq!(cli.timeout, 30);
        assert_eq!(cli.row_count, 0);
        assert_eq!(cli.threads, 1);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_server_alias_for_host() {
        let cli = Cli::try_parse_from(["mssql-pillage", "--server", "sql01"]).unwrap();
        assert_eq!(cli.host.as_deref(), Some("sql01"));
    }

    #[test]
    fn test_scan_config_mapping() {
        let cli = Cli::try_parse_from([
            "mssql-pillage",
            "--host",
            "sql01",
            "--port",
            "1434",
            "--timeout",
            "5",
            "--row-count",
            "100",
            "--threads",
            "8",
        ])
        .unwrap();

        let config = cli.scan_config();
        assert_eq!(config.port, 1434);
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.min_rows, 100);
        assert_eq!(config.max_concurrency, 8);
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::try_parse_from(["mssql-pillage", "--host", "sql01", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_threads_zero_still_scans_sequentially() {
        let cli =
            Cli::try_parse_from(["mssql-pillage", "--host", "sql01", "--threads", "0"]).unwrap();
        assert_eq!(cli.scan_config().max_concurrency, 1);
    }
}
