//! Plan Row Model - one row of a tabular execution plan
//!
//! MySQL-style EXPLAIN describes a query as a flat list of table accesses,
//! one row each, in the order the engine joins them. This module models that
//! list; it does not try to rebuild a tree.

use serde::{Deserialize, Serialize};

/// How the engine reaches the rows of a table (EXPLAIN's `type` column)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessType {
    /// Table has a single row
    System,
    /// At most one matching row, read once at the start of the query
    Const,
    /// One row read per combination of rows from the previous tables
    EqRef,
    /// All rows with matching index values (non-unique lookup)
    Ref,
    /// Fulltext index
    Fulltext,
    /// Like ref, but also searches for NULL
    RefOrNull,
    /// Multiple indexes merged
    IndexMerge,
    /// Unique subquery optimization
    UniqueSubquery,
    /// Non-unique subquery optimization
    IndexSubquery,
    /// Index range scan
    Range,
    /// Full index scan
    Index,
    /// Full table scan
    #[serde(rename = "ALL")]
    All,
    /// Missing or unrecognized access type
    #[default]
    Unknown,
}

impl AccessType {
    /// Parses EXPLAIN's `type` column.
    ///
    /// Matching ignores ASCII case. Anything unrecognized, including an empty
    /// string, becomes `Unknown`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "system" => Self::System,
            "const" => Self::Const,
            "eq_ref" => Self::EqRef,
            "ref" => Self::Ref,
            "fulltext" => Self::Fulltext,
            "ref_or_null" => Self::RefOrNull,
            "index_merge" => Self::IndexMerge,
            "unique_subquery" => Self::UniqueSubquery,
            "index_subquery" => Self::IndexSubquery,
            "range" => Self::Range,
            "index" => Self::Index,
            "all" => Self::All,
            _ => Self::Unknown,
        }
    }

    /// Returns the access type as MySQL spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Const => "const",
            Self::EqRef => "eq_ref",
            Self::Ref => "ref",
            Self::Fulltext => "fulltext",
            Self::RefOrNull => "ref_or_null",
            Self::IndexMerge => "index_merge",
            Self::UniqueSubquery => "unique_subquery",
            Self::IndexSubquery => "index_subquery",
            Self::Range => "range",
            Self::Index => "index",
            Self::All => "ALL",
            Self::Unknown => "unknown",
        }
    }

    /// Returns true if every row of the table is read
    pub fn is_full_scan(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl std::fmt::Display for AccessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of an execution plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanRow {
    /// SELECT identifier (`id`)
    pub select_id: Option<u64>,
    /// Kind of SELECT (`select_type`, e.g. SIMPLE, PRIMARY, SUBQUERY)
    pub select_type: Option<String>,
    /// Table the row refers to
    pub table: Option<String>,
    /// Access method (`type`)
    pub access_type: AccessType,
    /// Indexes the optimizer considered
    pub possible_keys: Option<String>,
    /// Index actually chosen
    pub key: Option<String>,
    /// Estimated rows examined
    pub rows: Option<u64>,
    /// Estimated percentage of rows kept by the table condition
    pub filtered: Option<f64>,
    /// Additional information (`Extra`), annotations joined by "; "
    pub extra: Option<String>,
}

impl PlanRow {
    /// Creates a plan row for `table` with the given access type
    pub fn new(table: impl Into<String>, access_type: AccessType) -> Self {
        Self {
            table: Some(table.into()),
            access_type,
            ..Self::default()
        }
    }

    /// Sets the chosen index
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the Extra column
    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = Some(extra.into());
        self
    }

    /// Sets the estimated rows examined
    pub fn with_rows(mut self, rows: u64) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Sets the indexes the optimizer considered
    pub fn with_possible_keys(mut self, keys: impl Into<String>) -> Self {
        self.possible_keys = Some(keys.into());
        self
    }

    /// Sets the SELECT identifier and type
    pub fn with_select(mut self, id: u64, select_type: impl Into<String>) -> Self {
        self.select_id = Some(id);
        self.select_type = Some(select_type.into());
        self
    }

    /// Returns true if an index was chosen for this access.
    ///
    /// An empty key counts as no index.
    pub fn uses_index(&self) -> bool {
        self.key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Returns true if the Extra column contains `needle` (case-sensitive)
    pub fn extra_contains(&self, needle: &str) -> bool {
        self.extra.as_deref().is_some_and(|e| e.contains(needle))
    }

    /// Returns the individual annotations of the Extra column
    pub fn extra_flags(&self) -> Vec<&str> {
        self.extra
            .as_deref()
            .map(crate::explain::mysql::parse_extra_flags)
            .unwrap_or_default()
    }

    /// Table name, or an empty string if the row has none
    pub fn table_or_empty(&self) -> &str {
        self.table.as_deref().unwrap_or("")
    }
}
