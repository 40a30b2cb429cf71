//! Scan configuration and credential handling.
//!
//! Credentials are supplied once per run and applied identically to every
//! server. The password lives in a [`Zeroizing`] container so it is cleared
//! from memory when the run ends, and it never appears in `Debug` output.

use std::fmt;
use std::time::Duration;
use zeroize::Zeroizing;

/// Login credentials for the scanned servers.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    domain: Option<String>,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Creates a new credential set with automatic password zeroing on drop.
    pub fn new(username: impl Into<String>, domain: Option<String>, password: String) -> Self {
        Self {
            username: username.into(),
            domain,
            password: Zeroizing::new(password),
        }
    }

    /// The login name sent to the server: `DOMAIN\user` when a domain
    /// qualifier was supplied, the bare username otherwise.
    #[must_use]
    pub fn login_name(&self) -> String {
        match &self.domain {
            Some(domain) => format!("{}\\{}", domain, self.username),
            None => self.username.clone(),
        }
    }

    /// The password, still protected by its zeroizing container.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("domain", &self.domain)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Tunable knobs for a scan run.
///
/// Everything here applies to the whole run; nothing is per-server.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Port the servers listen on
    pub port: u16,
    /// TCP connection timeout
    pub connect_timeout: Duration,
    /// Minimum row count a table must reach before it is reported.
    /// With the default of 0, any non-zero count qualifies.
    pub min_rows: u64,
    /// Maximum number of servers scanned in parallel
    pub max_concurrency: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            port: 1433,
            connect_timeout: Duration::from_secs(30),
            min_rows: 0,
            max_concurrency: 1,
        }
    }
}

impl ScanConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the server port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the TCP connection timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the minimum row count a table must reach to be reported.
    #[must_use]
    pub fn with_min_rows(mut self, min_rows: u64) -> Self {
        self.min_rows = min_rows;
        self
    }

    /// Sets the maximum number of servers scanned in parallel.
    #[must_use]
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1); // Ensure at least 1
        self
    }

    /// Whether a table with this row count belongs in the report.
    ///
    /// Empty tables are never reported, whatever the threshold.
    #[must_use]
    pub fn should_report(&self, row_count: u64) -> bool {
        row_count > 0 && row_count >= self.min_rows
    }
}
