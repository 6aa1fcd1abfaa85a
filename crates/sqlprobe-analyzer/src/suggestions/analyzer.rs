//! Plan Analyzer - rule evaluation over EXPLAIN rows
//!
//! Rules run per plan row, in a fixed order, and each rule adds at most one
//! finding for that row:
//!
//! 1. full table scan (`type = ALL`)
//! 2. missing index (`key` is NULL or empty, whatever the access type)
//! 3. filesort (`Extra` contains `Using filesort`)
//! 4. temporary table (`Extra` contains `Using temporary`)
//!
//! Findings for row *i* always precede findings for row *i + 1*. Report
//! rendering depends on that order staying stable.
//!
//! With `AnalyzerConfig::extended_rules` enabled, two more per-row rules
//! (unindexed filter, large row scan) run after rule 4, and a plan-wide join
//! order check runs after the last row.

use crate::explain::PlanRow;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Severity level for findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Likely to hurt performance
    Warning,
    /// Worth a look
    Info,
}

impl Severity {
    /// Returns true if this is a warning
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Warning)
    }

    /// Returns the severity level as a display string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of issue a finding describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCategory {
    /// Every row of the table is read
    FullTableScan,
    /// No index was chosen for the table access
    MissingIndex,
    /// Rows are sorted outside of index order
    Filesort,
    /// An internal temporary table is materialized
    TemporaryTable,
    /// A WHERE condition is evaluated without an index
    UnindexedFilter,
    /// The estimated rows examined exceed the configured threshold
    LargeRowScan,
    /// The first table in the join order examines many rows
    SuboptimalJoinOrder,
}

impl FindingCategory {
    /// Severity every finding of this category carries
    pub fn severity(&self) -> Severity {
        match self {
            Self::FullTableScan => Severity::Warning,
            Self::MissingIndex => Severity::Warning,
            Self::Filesort => Severity::Info,
            Self::TemporaryTable => Severity::Info,
            Self::UnindexedFilter => Severity::Warning,
            Self::LargeRowScan => Severity::Warning,
            Self::SuboptimalJoinOrder => Severity::Info,
        }
    }

    /// Returns true for categories only produced by the extended rules
    pub fn is_extended(&self) -> bool {
        matches!(
            self,
            Self::UnindexedFilter | Self::LargeRowScan | Self::SuboptimalJoinOrder
        )
    }
}

/// A detected issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Severity level, derived from the category
    pub severity: Severity,
    /// Kind of issue
    pub category: FindingCategory,
    /// Table the finding concerns, empty if plan-wide
    pub subject: String,
    /// Human-readable description of the issue
    pub message: String,
    /// Suggested remediation
    pub suggestion: String,
}

impl Finding {
    /// Creates a finding; severity follows from the category
    pub fn new(
        category: FindingCategory,
        subject: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            severity: category.severity(),
            category,
            subject: subject.into(),
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Returns true if the finding is about the plan as a whole
    pub fn is_plan_wide(&self) -> bool {
        self.subject.is_empty()
    }
}

/// Findings for one query plus the measured execution time of the query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Findings in plan row order, then rule order
    pub findings: Vec<Finding>,
    /// Execution time of the analyzed query (measured apart from EXPLAIN)
    pub execution_time: Duration,
}

impl AnalysisResult {
    /// Creates a new analysis result
    pub fn new(findings: Vec<Finding>, execution_time: Duration) -> Self {
        Self {
            findings,
            execution_time,
        }
    }

    /// Returns true if nothing was flagged
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Returns true if any finding is a warning
    pub fn has_warnings(&self) -> bool {
        self.findings.iter().any(|f| f.severity.is_warning())
    }

    /// Number of findings with the given severity
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    /// Findings about one table, in order
    pub fn findings_for<'a>(&'a self, table: &'a str) -> impl Iterator<Item = &'a Finding> + 'a {
        self.findings.iter().filter(move |f| f.subject == table)
    }

    /// Execution time in fractional milliseconds
    pub fn execution_time_ms(&self) -> f64 {
        self.execution_time.as_secs_f64() * 1000.0
    }

    /// One-line summary of the analysis
    pub fn summary(&self) -> String {
        let warnings = self.count_by_severity(Severity::Warning);
        let info = self.count_by_severity(Severity::Info);

        if self.findings.is_empty() {
            "No obvious performance issues detected. Query appears to be well-optimized."
                .to_string()
        } else if warnings > 0 {
            format!("Query has {} warning(s) and {} suggestion(s).", warnings, info)
        } else {
            format!("Query has {} minor suggestion(s).", info)
        }
    }
}

/// Configuration for the plan analyzer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Whether to run the rules beyond the four core checks
    pub extended_rules: bool,
    /// Estimated rows above which a table access is flagged as a large scan
    pub large_scan_threshold: u64,
    /// Estimated rows on the first joined table above which the join order is flagged
    pub join_order_threshold: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            extended_rules: false,
            large_scan_threshold: 10_000,
            join_order_threshold: 1_000,
        }
    }
}

impl AnalyzerConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the extended rules run
    pub fn with_extended_rules(mut self, enabled: bool) -> Self {
        self.extended_rules = enabled;
        self
    }

    /// Sets the large row scan threshold
    pub fn with_large_scan_threshold(mut self, threshold: u64) -> Self {
        self.large_scan_threshold = threshold;
        self
    }

    /// Sets the join order threshold
    pub fn with_join_order_threshold(mut self, threshold: u64) -> Self {
        self.join_order_threshold = threshold;
        self
    }
}

const FULL_TABLE_SCAN_SUGGESTION: &str =
    "Consider adding an index on the columns used in the WHERE/JOIN/ORDER BY clause for this table.";
const MISSING_INDEX_SUGGESTION: &str = "No index is being used for this table; evaluate adding one matching the query's filter/join/sort columns.";
const FILESORT_SUGGESTION: &str = "Query requires an in-memory/on-disk sort; consider an index that matches the ORDER BY to avoid filesort.";
const TEMPORARY_TABLE_SUGGESTION: &str = "Query materializes a temporary table, often from GROUP BY/DISTINCT over non-indexed columns; consider indexing the grouped columns.";

/// Plan analyzer that turns EXPLAIN rows into findings
#[derive(Debug, Clone, Default)]
pub struct PlanAnalyzer {
    config: AnalyzerConfig,
}

impl PlanAnalyzer {
    /// Creates a new analyzer running only the core rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new analyzer with custom config
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Returns the analyzer config
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyzes plan rows and returns the findings in order
    pub fn analyze(&self, rows: &[PlanRow]) -> Vec<Finding> {
        let mut findings = Vec::new();

        for row in rows {
            self.check_row(row, &mut findings);
        }

        if self.config.extended_rules {
            findings.extend(self.check_join_order(rows));
        }

        findings
    }

    /// Analyzes plan rows and pairs the findings with the measured query time
    pub fn analyze_with_timing(&self, rows: &[PlanRow], execution_time: Duration) -> AnalysisResult {
        AnalysisResult::new(self.analyze(rows), execution_time)
    }

    fn check_row(&self, row: &PlanRow, findings: &mut Vec<Finding>) {
        findings.extend(check_full_table_scan(row));
        findings.extend(check_missing_index(row));
        findings.extend(check_filesort(row));
        findings.extend(check_temporary_table(row));

        if self.config.extended_rules {
            findings.extend(check_unindexed_filter(row));
            findings.extend(self.check_large_row_scan(row));
        }
    }

    fn check_large_row_scan(&self, row: &PlanRow) -> Option<Finding> {
        let rows = row.rows.filter(|&r| r > self.config.large_scan_threshold)?;
        let table = display_table(row);

        Some(Finding::new(
            FindingCategory::LargeRowScan,
            row.table_or_empty(),
            format!(
                "Large number of rows scanned ({}) on table '{}'",
                format_count(rows),
                table
            ),
            format!(
                "Table '{}' is scanning {} rows. Consider adding more selective indexes or refining your WHERE conditions.",
                table,
                format_count(rows)
            ),
        ))
    }

    fn check_join_order(&self, rows: &[PlanRow]) -> Option<Finding> {
        if rows.len() < 2 {
            return None;
        }

        let first_rows = rows[0]
            .rows
            .filter(|&r| r > self.config.join_order_threshold)?;

        Some(Finding::new(
            FindingCategory::SuboptimalJoinOrder,
            "",
            "Potential suboptimal join order",
            format!(
                "The first table in the join order scans {} rows. Consider reordering tables in your JOIN to start with the most selective table.",
                format_count(first_rows)
            ),
        ))
    }
}

fn check_full_table_scan(row: &PlanRow) -> Option<Finding> {
    if !row.access_type.is_full_scan() {
        return None;
    }

    Some(Finding::new(
        FindingCategory::FullTableScan,
        row.table_or_empty(),
        format!("Full table scan on table '{}' is happening", display_table(row)),
        FULL_TABLE_SCAN_SUGGESTION,
    ))
}

// Fires even when the full scan rule already did: both facts get reported.
fn check_missing_index(row: &PlanRow) -> Option<Finding> {
    if row.uses_index() {
        return None;
    }

    Some(Finding::new(
        FindingCategory::MissingIndex,
        row.table_or_empty(),
        format!("No index used for table '{}'", display_table(row)),
        MISSING_INDEX_SUGGESTION,
    ))
}

fn check_filesort(row: &PlanRow) -> Option<Finding> {
    if !row.extra_contains("Using filesort") {
        return None;
    }

    Some(Finding::new(
        FindingCategory::Filesort,
        row.table_or_empty(),
        format!("Using filesort for table '{}'", display_table(row)),
        FILESORT_SUGGESTION,
    ))
}

fn check_temporary_table(row: &PlanRow) -> Option<Finding> {
    if !row.extra_contains("Using temporary") {
        return None;
    }

    Some(Finding::new(
        FindingCategory::TemporaryTable,
        row.table_or_empty(),
        format!("Using temporary table for '{}'", display_table(row)),
        TEMPORARY_TABLE_SUGGESTION,
    ))
}

fn check_unindexed_filter(row: &PlanRow) -> Option<Finding> {
    if row.uses_index() || !row.extra_contains("Using where") {
        return None;
    }

    let table = display_table(row);
    Some(Finding::new(
        FindingCategory::UnindexedFilter,
        row.table_or_empty(),
        format!("Unindexed WHERE clause on table '{}'", table),
        format!(
            "The WHERE clause on table '{}' is not using an index. Add an index on the filtered columns.",
            table
        ),
    ))
}

fn display_table(row: &PlanRow) -> &str {
    row.table.as_deref().unwrap_or("unknown")
}

/// Formats a count with comma thousands separators (`12345` -> `12,345`)
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}
