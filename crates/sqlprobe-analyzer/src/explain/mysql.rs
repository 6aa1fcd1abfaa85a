//! MySQL EXPLAIN mapping
//!
//! Maps the traditional tabular EXPLAIN result set onto `PlanRow`s.
//!
//! The result set has these columns (MySQL 5.7+; `partitions` and `filtered`
//! are missing on older servers and on some MariaDB versions):
//! id | select_type | table | partitions | type | possible_keys | key | key_len | ref | rows | filtered | Extra
//!
//! Columns are looked up by name, so their position and presence do not
//! matter. Every field is optional: a missing column, a SQL NULL, an empty
//! string and the literal text `NULL` all map to `None`.
//!
//! # Examples
//!
//! ```
//! use sqlprobe_analyzer::explain::mysql::plan_rows_from_result;
//! use sqlprobe_core::{QueryResult, Value};
//!
//! let result = QueryResult::from_rows(
//!     &["table", "type", "key", "Extra"],
//!     vec![vec![
//!         Value::String("users".into()),
//!         Value::String("const".into()),
//!         Value::String("PRIMARY".into()),
//!         Value::Null,
//!     ]],
//! );
//!
//! let rows = plan_rows_from_result(&result);
//! assert_eq!(rows[0].key.as_deref(), Some("PRIMARY"));
//! assert!(rows[0].extra.is_none());
//! ```

use crate::explain::plan::{AccessType, PlanRow};
use sqlprobe_core::{QueryResult, Row, Value};

/// Maps every row of an EXPLAIN result set, preserving order
pub fn plan_rows_from_result(result: &QueryResult) -> Vec<PlanRow> {
    result.rows.iter().map(plan_row_from_row).collect()
}

/// Maps a single EXPLAIN result row
pub fn plan_row_from_row(row: &Row) -> PlanRow {
    let access_type = text_column(row, "type")
        .map(|t| AccessType::parse(&t))
        .unwrap_or_default();

    PlanRow {
        select_id: unsigned_column(row, "id"),
        select_type: text_column(row, "select_type"),
        table: text_column(row, "table"),
        access_type,
        possible_keys: text_column(row, "possible_keys"),
        key: text_column(row, "key"),
        rows: unsigned_column(row, "rows"),
        filtered: row
            .get_by_name_ignore_case("filtered")
            .and_then(Value::as_f64),
        extra: text_column(row, "Extra"),
    }
}

/// Splits an Extra column into its annotations.
///
/// MySQL joins annotations with "; ". Empty pieces are dropped.
pub fn parse_extra_flags(extra: &str) -> Vec<&str> {
    extra
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn text_column(row: &Row, name: &str) -> Option<String> {
    let text = row.get_by_name_ignore_case(name)?.to_text()?;
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "NULL" {
        return None;
    }
    Some(trimmed.to_string())
}

fn unsigned_column(row: &Row, name: &str) -> Option<u64> {
    row.get_by_name_ignore_case(name)?
        .as_i64()
        .and_then(|v| u64::try_from(v).ok())
}

#[cfg(test)]
mod tests;
