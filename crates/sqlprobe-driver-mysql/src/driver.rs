//! MySQL driver implementation

use std::sync::Arc;

use sqlprobe_core::{Connection, ConnectionConfig, Result, SqlProbeError};

use crate::MySqlConnection;

/// MySQL database driver
#[derive(Debug, Clone, Copy)]
pub struct MySqlDriver;

impl MySqlDriver {
    /// Create a new MySQL driver instance
    pub fn new() -> Self {
        tracing::debug!("MySQL driver initialized");
        Self
    }

    pub fn name(&self) -> &'static str {
        "mysql"
    }

    /// Open a connection described by `config`
    #[tracing::instrument(skip(self, config), fields(target = %config.build_connection_string()))]
    pub async fn connect(&self, config: &ConnectionConfig) -> Result<Arc<dyn Connection>> {
        if !config.driver.is_empty() && config.driver != self.name() {
            return Err(SqlProbeError::Configuration(format!(
                "MySQL driver cannot open a '{}' connection",
                config.driver
            )));
        }

        let host = config.host_or_default();
        let port = config.port_or_default();

        let conn = MySqlConnection::connect(
            host,
            port,
            config.database.as_deref(),
            config.username.as_deref(),
            config.password.as_deref(),
        )
        .await
        .inspect_err(|e| tracing::debug!(error = %e, "failed to connect to MySQL database"))?;

        tracing::info!(host = %host, port = %port, database = ?config.database, "MySQL connection created");
        Ok(Arc::new(conn))
    }
}

impl Default for MySqlDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_identity() {
        let driver = MySqlDriver::new();
        assert_eq!(driver.name(), "mysql");
    }

    #[tokio::test]
    async fn test_connect_rejects_foreign_driver() {
        let config = ConnectionConfig::new("postgres");
        let err = match MySqlDriver::new().connect(&config).await {
            Ok(_) => panic!("expected configuration error"),
            Err(e) => e,
        };
        assert!(matches!(err, SqlProbeError::Configuration(_)));
    }
}
