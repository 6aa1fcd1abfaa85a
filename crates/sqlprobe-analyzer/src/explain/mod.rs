//! Query EXPLAIN module
//!
//! - `plan` holds the typed plan row model
//! - `mysql` maps MySQL/MariaDB tabular EXPLAIN result sets onto it
//!
//! # Example
//!
//! ```
//! use sqlprobe_analyzer::explain::{AccessType, PlanRow, plan_rows_from_result};
//! use sqlprobe_core::{QueryResult, Value};
//!
//! let result = QueryResult::from_rows(
//!     &["id", "select_type", "table", "type", "key", "Extra"],
//!     vec![vec![
//!         Value::Int64(1),
//!         Value::String("SIMPLE".into()),
//!         Value::String("orders".into()),
//!         Value::String("ALL".into()),
//!         Value::Null,
//!         Value::String("Using where".into()),
//!     ]],
//! );
//!
//! let rows: Vec<PlanRow> = plan_rows_from_result(&result);
//! assert_eq!(rows[0].access_type, AccessType::All);
//! assert!(!rows[0].uses_index());
//! ```

pub mod mysql;
pub mod plan;

pub use mysql::{parse_extra_flags, plan_row_from_row, plan_rows_from_result};
pub use plan::{AccessType, PlanRow};
