//! View models for probe results

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlprobe_analyzer::{AnalysisResult, PlanRow};
use sqlprobe_core::QueryResult;

/// Timing and size of the measured query run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExecutionStats {
    /// Wall-clock time to execute the query and fetch every row
    pub elapsed: Duration,
    /// Number of rows the query returned
    pub row_count: usize,
}

impl ExecutionStats {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Everything a single probe learned about one statement
#[derive(Debug, Clone)]
pub struct ProbeReport {
    /// The statement that was executed and explained
    pub sql: String,
    pub execution: ExecutionStats,
    /// EXPLAIN output as returned by the engine, every column included
    pub raw_plan: QueryResult,
    pub plan: Vec<PlanRow>,
    pub analysis: AnalysisResult,
}

impl ProbeReport {
    pub fn has_findings(&self) -> bool {
        !self.analysis.findings.is_empty()
    }
}
