//! Target server resolution.
//!
//! Targets come from a single host argument or a newline-delimited file;
//! the file takes precedence when both are given. A target's identity is the
//! literal string used here, both for the connection and for the report
//! filename.

use crate::error::{PillageError, Result};
use std::path::Path;

/// Resolves the set of target servers for a run.
///
/// # Errors
///
/// Fails when neither source is given, or when the input file cannot be
/// read. Both are fatal to the run; no connection is attempted.
pub fn load_targets(host: Option<&str>, input_file: Option<&Path>) -> Result<Vec<String>> {
    if let Some(path) = input_file {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PillageError::io(format!("failed to read server list {}", path.display()), e)
        })?;
        return Ok(parse_target_list(&contents));
    }

    match host {
        Some(host) if !host.trim().is_empty() => Ok(vec![host.trim().to_string()]),
        _ => Err(PillageError::configuration(
            "need a server (--host) or an input file (--input-file)",
        )),
    }
}

/// Splits a newline-delimited server list, skipping blank lines and
/// preserving the order of the rest.
#[must_use]
pub fn parse_target_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
