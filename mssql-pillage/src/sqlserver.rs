//! SQL Server session handling.
//!
//! One session per server, alive only for that server's scan. The session
//! requests read-only application intent; some servers require the hint.

use mssql_pillage_core::catalog;
use mssql_pillage_core::{ColumnMatch, Credentials, PillageError, Result, ScanConfig};
use tiberius::{AuthMethod, Client, Config};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};

/// Builds the tiberius config for one server.
#[must_use]
pub fn session_config(server: &str, credentials: &Credentials, config: &ScanConfig) -> Config {
    let mut tiberius_config = Config::new();
    tiberius_config.host(server);
    tiberius_config.port(config.port);
    tiberius_config.authentication(AuthMethod::sql_server(
        credentials.login_name(),
        credentials.password(),
    ));
    tiberius_config.readonly(true);
    // Assessment networks run self-signed certs everywhere
    tiberius_config.trust_cert();
    tiberius_config
}

/// An open session against one server.
pub struct SqlServerSession {
    server: String,
    client: Client<Compat<TcpStream>>,
}

impl SqlServerSession {
    /// Connects to a server, bounding the TCP connect by the configured
    /// timeout. Tiberius has no config-level connect timeout, so the bound
    /// is applied around the socket connect.
    ///
    /// # Errors
    ///
    /// Returns an error when the socket cannot be opened within the timeout
    /// or the TDS handshake fails. The caller logs and skips the server.
    pub async fn connect(
        server: &str,
        credentials: &Credentials,
        config: &ScanConfig,
    ) -> Result<Self> {
        let tiberius_config = session_config(server, credentials, config);

        let tcp = tokio::time::timeout(
            config.connect_timeout,
            TcpStream::connect(tiberius_config.get_addr()),
        )
        .await
        .map_err(|_| PillageError::ConnectionTimeout {
            server: server.to_string(),
            timeout: config.connect_timeout,
        })?
        .map_err(|e| PillageError::connection_failed(server, e))?;

        tcp.set_nodelay(true)
            .map_err(|e| PillageError::connection_failed(server, e))?;

        let client = Client::connect(tiberius_config, tcp.compat_write())
            .await
            .map_err(|e| PillageError::connection_failed(server, e))?;

        Ok(Self {
            server: server.to_string(),
            client,
        })
    }

    /// Lists the non-system databases, in whatever order the catalog
    /// returns them.
    ///
    /// # Errors
    ///
    /// A failure here skips the whole server.
    pub async fn list_databases(&mut self) -> Result<Vec<String>> {
        let rows = self
            .query_rows(catalog::DATABASE_LIST_SQL, "database list")
            .await?;

        let mut databases = Vec::new();
        for row in rows {
            if let Some(name) = row.get::<&str, _>(0) {
                databases.push(name.to_string());
            }
        }
        Ok(databases)
    }

    /// Scans one database's information schema for sensitive column names,
    /// capped at the first [`catalog::COLUMN_SCAN_CAP`] matches.
    ///
    /// # Errors
    ///
    /// A failure here skips this database only.
    pub async fn scan_columns(&mut self, database: &str) -> Result<Vec<ColumnMatch>> {
        let sql = catalog::column_scan_sql(database);
        let rows = self
            .query_rows(&sql, &format!("column scan of {database}"))
            .await?;

        let mut matches = Vec::with_capacity(rows.len());
        for row in rows {
            matches.push(ColumnMatch {
                catalog: required_text(&row, 0, "TABLE_CATALOG", database)?,
                schema: required_text(&row, 1, "TABLE_SCHEMA", database)?,
                table: required_text(&row, 2, "TABLE_NAME", database)?,
                column: required_text(&row, 3, "COLUMN_NAME", database)?,
            });
        }
        Ok(matches)
    }

    /// Counts the rows of one fully qualified table.
    ///
    /// # Errors
    ///
    /// A failure here skips this match only.
    pub async fn count_rows(&mut self, database: &str, schema: &str, table: &str) -> Result<u64> {
        let qualified = format!("{database}.{schema}.{table}");
        let sql = catalog::row_count_sql(database, schema, table);

        let stream = self
            .client
            .query(&sql, &[])
            .await
            .map_err(|e| PillageError::row_count_failed(&qualified, e))?;
        let rows = stream
            .into_first_result()
            .await
            .map_err(|e| PillageError::row_count_failed(&qualified, e))?;

        let row = rows.into_iter().next().ok_or_else(|| {
            PillageError::query_result(format!("empty row count result for {qualified}"))
        })?;
        let count: i64 = row.get(0).ok_or_else(|| {
            PillageError::query_result(format!("missing count value for {qualified}"))
        })?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn query_rows(&mut self, sql: &str, what: &str) -> Result<Vec<tiberius::Row>> {
        let stream = self
            .client
            .query(sql, &[])
            .await
            .map_err(|e| PillageError::catalog_failed(format!("{what} on {}", self.server), e))?;

        stream
            .into_first_result()
            .await
            .map_err(|e| PillageError::catalog_failed(format!("{what} on {}", self.server), e))
    }
}

fn required_text(row: &tiberius::Row, index: usize, name: &str, database: &str) -> Result<String> {
    row.get::<&str, _>(index)
        .map(str::to_string)
        .ok_or_else(|| {
            PillageError::query_result(format!("missing {name} in column scan of {database}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_addr_uses_configured_port() {
        let credentials = Credentials::new("sa", None, "pw".to_string());
        let config = ScanConfig::new();
        let tiberius_config = session_config("sql01", &credentials, &config);
        assert_eq!(tiberius_config.get_addr(), "sql01:1433");

        let config = ScanConfig::new().with_port(14330);
        let tiberius_config = session_config("sql01", &credentials, &config);
        assert_eq!(tiberius_config.get_addr(), "sql01:14330");
    }
}
