//! Core types for sqlprobe

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A database value as returned by a driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// NULL value
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int64(i64),
    /// 32-bit floating point
    Float32(f32),
    /// 64-bit floating point
    Float64(f64),
    /// Decimal/Numeric (stored as string for precision)
    Decimal(String),
    /// UTF-8 string
    String(String),
    /// Binary data
    Bytes(Vec<u8>),
    /// Date (year, month, day)
    Date(NaiveDate),
    /// DateTime without timezone
    DateTime(NaiveDateTime),
}

impl Value {
    /// Check if the value is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Decimal(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            Value::Float32(v) if v.fract() == 0.0 => Some(*v as i64),
            Value::Float64(v) if v.fract() == 0.0 => Some(*v as i64),
            Value::String(s) | Value::Decimal(s) => s.trim().parse::<i64>().ok(),
            Value::Bytes(b) => std::str::from_utf8(b).ok()?.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    /// Try to get as f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float32(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            Value::String(s) | Value::Decimal(s) => s.trim().parse::<f64>().ok(),
            Value::Bytes(b) => std::str::from_utf8(b).ok()?.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Text form of the value, `None` for NULL.
    ///
    /// Byte strings are decoded as UTF-8 when possible; MySQL's text protocol
    /// hands most columns back that way.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Bytes(b) => Some(String::from_utf8_lossy(b).into_owned()),
            other => Some(other.to_string()),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Float32(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
            Value::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            Value::Date(v) => write!(f, "{}", v),
            Value::DateTime(v) => write!(f, "{}", v),
        }
    }
}

/// A row from a query result
#[derive(Debug, Clone)]
pub struct Row {
    /// Column values
    pub values: Vec<Value>,
    /// Column names
    columns: Vec<String>,
}

impl Row {
    /// Create a new row
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> Self {
        Self { values, columns }
    }

    /// Get a value by column index
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Get a value by column name, ignoring ASCII case.
    ///
    /// MySQL reports `Extra` capitalized while every other EXPLAIN column is
    /// lower case, and MariaDB has shipped both spellings.
    pub fn get_by_name_ignore_case(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .and_then(|idx| self.values.get(idx))
    }

    /// Get column names
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// Column metadata
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ColumnMeta {
    /// Column name
    #[serde(default)]
    pub name: String,
    /// Column ordinal position (0-based)
    #[serde(default)]
    pub ordinal: usize,
}

impl ColumnMeta {
    /// Creates column metadata with the given name and position
    pub fn new(name: impl Into<String>, ordinal: usize) -> Self {
        Self {
            name: name.into(),
            ordinal,
        }
    }
}

/// Query result
#[derive(Debug, Clone)]
pub struct QueryResult {
    /// Column metadata
    pub columns: Vec<ColumnMeta>,
    /// Result rows
    pub rows: Vec<Row>,
    /// Wall-clock time spent executing the statement and fetching every row
    pub execution_time: Duration,
}

impl QueryResult {
    /// Create a new empty query result
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            execution_time: Duration::ZERO,
        }
    }

    /// Build a result from column names and row values.
    pub fn from_rows(column_names: &[&str], rows: Vec<Vec<Value>>) -> Self {
        let names: Vec<String> = column_names.iter().map(|s| s.to_string()).collect();
        Self {
            columns: names
                .iter()
                .enumerate()
                .map(|(idx, name)| ColumnMeta::new(name.clone(), idx))
                .collect(),
            rows: rows
                .into_iter()
                .map(|values| Row::new(names.clone(), values))
                .collect(),
            ..Self::empty()
        }
    }

    /// Sets the measured execution time
    pub fn with_execution_time(mut self, execution_time: Duration) -> Self {
        self.execution_time = execution_time;
        self
    }

    /// Check if the result has rows
    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Column names in result order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}
