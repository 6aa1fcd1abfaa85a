//! Query probe service
//!
//! Runs a statement for real, asks the engine for its plan on the same
//! connection, and feeds that plan to the analyzer.

use sqlprobe_analyzer::{AnalyzerConfig, PlanAnalyzer, PlanRow, plan_rows_from_result};
use sqlprobe_core::{Connection, QueryResult};

use crate::error::{QueryServiceError, QueryServiceResult};
use crate::view_models::{ExecutionStats, ProbeReport};

/// Service for measuring and analyzing a single statement
#[derive(Debug, Clone, Default)]
pub struct QueryService {
    analyzer: PlanAnalyzer,
}

impl QueryService {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            analyzer: PlanAnalyzer::with_config(config),
        }
    }

    pub fn analyzer(&self) -> &PlanAnalyzer {
        &self.analyzer
    }

    /// Strips surrounding whitespace and trailing statement terminators.
    pub fn normalize_statement(sql: &str) -> &str {
        let mut statement = sql.trim();
        while let Some(stripped) = statement.strip_suffix(';') {
            statement = stripped.trim_end();
        }
        statement
    }

    /// Execute `sql` and fetch every row
    ///
    /// The elapsed time is the one the connection measured around execution
    /// and fetch.
    #[tracing::instrument(skip(self, connection, sql), fields(sql_preview = %sql.chars().take(50).collect::<String>()))]
    pub async fn measure_execution(
        &self,
        connection: &dyn Connection,
        sql: &str,
    ) -> QueryServiceResult<ExecutionStats> {
        let result = connection.query(sql).await.map_err(|e| {
            tracing::debug!(error = %e, "query execution failed");
            QueryServiceError::QueryFailed(e.to_string())
        })?;

        let stats = ExecutionStats {
            elapsed: result.execution_time,
            row_count: result.row_count(),
        };
        tracing::debug!(
            elapsed_ms = stats.elapsed_ms(),
            row_count = stats.row_count,
            "query measured"
        );
        Ok(stats)
    }

    /// Ask the engine for the plan of `sql` and map it onto plan rows
    #[tracing::instrument(skip(self, connection, sql), fields(driver = connection.driver_name()))]
    pub async fn explain(
        &self,
        connection: &dyn Connection,
        sql: &str,
    ) -> QueryServiceResult<(QueryResult, Vec<PlanRow>)> {
        let explain_sql = connection.explain_config().format_explain(sql);

        let raw_plan = connection.query(&explain_sql).await.map_err(|e| {
            tracing::debug!(error = %e, "EXPLAIN failed");
            QueryServiceError::ExplainFailed(e.to_string())
        })?;
        let plan = plan_rows_from_result(&raw_plan);

        tracing::debug!(plan_rows = plan.len(), "plan retrieved");
        Ok((raw_plan, plan))
    }

    /// Measure, explain and analyze one statement
    ///
    /// The statement runs before its EXPLAIN, and a failure in either step
    /// aborts the probe.
    #[tracing::instrument(skip(self, connection, sql))]
    pub async fn probe(
        &self,
        connection: &dyn Connection,
        sql: &str,
    ) -> QueryServiceResult<ProbeReport> {
        let statement = Self::normalize_statement(sql);
        if statement.is_empty() {
            return Err(QueryServiceError::EmptyQuery);
        }

        let execution = self.measure_execution(connection, statement).await?;
        let (raw_plan, plan) = self.explain(connection, statement).await?;
        let analysis = self.analyzer.analyze_with_timing(&plan, execution.elapsed);

        tracing::info!(
            findings = analysis.findings.len(),
            elapsed_ms = execution.elapsed_ms(),
            "probe complete"
        );

        Ok(ProbeReport {
            sql: statement.to_string(),
            execution,
            raw_plan,
            plan,
            analysis,
        })
    }
}
