//! Sensitive-column scanner for SQL Server estates.
//!
//! Connects to each target with read-only credentials, enumerates every
//! non-system database, matches column names against a fixed list of
//! sensitive patterns, counts rows in each matched table, and writes one
//! plain-text report per server.

use anyhow::Context;
use clap::Parser;
use mssql_pillage::{Cli, scan};
use mssql_pillage_core::{Credentials, init_logging, targets};
use std::io::Write;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet)?;

    let targets = targets::load_targets(cli.host.as_deref(), cli.input_file.as_deref())
        .context("unable to resolve scan targets")?;

    let password = match cli.pass.clone() {
        Some(password) => password,
        None => prompt_password()?,
    };
    let credentials = Credentials::new(
        cli.user.clone().unwrap_or_default(),
        cli.domain.clone(),
        password,
    );

    let config = cli.scan_config();
    scan::run(
        &targets,
        &credentials,
        &config,
        &cli.output,
        cli.verbose > 0,
    )
    .await?;

    Ok(())
}

/// Reads the password from the terminal without echo.
fn prompt_password() -> anyhow::Result<String> {
    print!("Password: ");
    std::io::stdout()
        .flush()
        .context("failed to flush stdout before reading password")?;
    rpassword::read_password().context("failed to read password")
}
