//! Dialect-specific EXPLAIN syntax

use std::borrow::Cow;

/// Describes how a dialect asks the engine for an execution plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainConfig {
    /// Format string for EXPLAIN (e.g., "EXPLAIN {sql}")
    /// Use `{sql}` as placeholder for the SQL statement
    pub explain_format: Cow<'static, str>,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            explain_format: Cow::Borrowed("EXPLAIN {sql}"),
        }
    }
}

impl ExplainConfig {
    /// MySQL/MariaDB tabular EXPLAIN, one row per table access
    pub fn mysql() -> Self {
        Self::default()
    }

    /// Builds the EXPLAIN statement for `sql`
    pub fn format_explain(&self, sql: &str) -> String {
        self.explain_format.replace("{sql}", sql)
    }
}
