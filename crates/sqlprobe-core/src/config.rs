//! Connection configuration

use serde::{Deserialize, Serialize};

/// Default MySQL port, used when a configuration leaves the port at 0
pub const DEFAULT_MYSQL_PORT: u16 = 3306;

/// Parameters needed to open a database connection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Driver ID (e.g., "mysql")
    pub driver: String,
    /// Host address
    pub host: String,
    /// Port number (0 for the driver default)
    pub port: u16,
    /// Database name
    pub database: Option<String>,
    /// Username
    pub username: Option<String>,
    /// Password
    #[serde(skip_serializing)]
    pub password: Option<String>,
}

impl ConnectionConfig {
    /// Create a new configuration for the given driver
    pub fn new(driver: &str) -> Self {
        Self {
            driver: driver.to_string(),
            ..Self::default()
        }
    }

    /// Create a MySQL configuration
    pub fn new_mysql(host: &str, port: u16, database: &str, username: &str) -> Self {
        let mut config = Self::new("mysql");
        config.host = host.to_string();
        config.port = port;
        config.database = Some(database.to_string());
        config.username = Some(username.to_string());
        config
    }

    /// Sets the password
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Port to connect to, falling back to the MySQL default
    pub fn port_or_default(&self) -> u16 {
        if self.port > 0 {
            self.port
        } else {
            DEFAULT_MYSQL_PORT
        }
    }

    /// Host to connect to, falling back to localhost
    pub fn host_or_default(&self) -> &str {
        if self.host.is_empty() {
            "localhost"
        } else {
            &self.host
        }
    }

    /// Builds a connection string suitable for logs and error messages.
    ///
    /// The password is always masked.
    pub fn build_connection_string(&self) -> String {
        let mut conn_str = format!("{}://", self.driver);

        if let Some(user) = &self.username {
            conn_str.push_str(user);
            if self.password.is_some() {
                conn_str.push_str(":***");
            }
            conn_str.push('@');
        }

        conn_str.push_str(&format!("{}:{}", self.host_or_default(), self.port_or_default()));

        if let Some(db) = &self.database {
            conn_str.push('/');
            conn_str.push_str(db);
        }

        conn_str
    }
}

#[cfg(test)]
mod tests;
