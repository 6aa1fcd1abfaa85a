//! Connection trait

use crate::{ExplainConfig, QueryResult, Result};
use async_trait::async_trait;

/// A database connection
///
/// Implementations run statements in a single session, so a plan requested
/// after a query sees the same schema state the query ran against.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Get the driver name (e.g., "mysql")
    fn driver_name(&self) -> &str;

    /// How this connection's dialect spells EXPLAIN
    fn explain_config(&self) -> ExplainConfig {
        ExplainConfig::default()
    }

    /// Execute a query, fetch every row, and report how long that took
    async fn query(&self, sql: &str) -> Result<QueryResult>;

    /// Close the connection
    async fn close(&self) -> Result<()>;
}
