//! Report rendering
//!
//! Every renderer returns the whole report as a string; `cli.rs` decides
//! where it goes.

use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL};
use serde::Serialize;
use sqlprobe_analyzer::{Finding, PlanRow, format_count};
use sqlprobe_core::QueryResult;
use sqlprobe_query::ProbeReport;

use crate::args::OutputFormat;

const REPORT_TITLE: &str = "SQL Query Performance Analysis Report";
const NO_ISSUES: &str = "No issues found!";
const RULE_WIDTH: usize = 80;

/// Render `report` in the requested format
pub fn render(report: &ProbeReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(report)),
        OutputFormat::Plain => Ok(render_plain(report)),
        OutputFormat::Json => render_json(report),
    }
}

fn render_table(report: &ProbeReport) -> String {
    let mut out = String::new();

    let mut title = Table::new();
    title.load_preset(UTF8_FULL).add_row(vec![Cell::new(REPORT_TITLE)]);
    out.push_str(&format!("{title}\n\n"));

    push_summary(&mut out, report, "");

    out.push_str("EXPLAIN Plan:\n");
    if report.raw_plan.has_rows() {
        let mut plan = Table::new();
        plan.load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Disabled)
            .set_header(report.raw_plan.column_names());
        for row in plan_cells(&report.raw_plan) {
            plan.add_row(row);
        }
        out.push_str(&format!("{plan}\n"));
    }

    push_findings(&mut out, report);
    out
}

fn render_plain(report: &ProbeReport) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("{rule}\n{}\n{rule}\n\n", REPORT_TITLE.to_uppercase()));

    push_summary(&mut out, report, "  ");

    out.push_str("EXPLAIN Plan:\n");
    if report.raw_plan.has_rows() {
        let headers = report.raw_plan.column_names();
        let cells = plan_cells(&report.raw_plan);

        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                cells
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .fold(header.chars().count(), usize::max)
            })
            .collect();

        let header_line = pad_columns(headers.iter().copied(), &widths);
        out.push_str(&format!("  {header_line}\n"));
        out.push_str(&format!("  {}\n", "-".repeat(header_line.chars().count())));
        for row in &cells {
            out.push_str(&format!(
                "  {}\n",
                pad_columns(row.iter().map(String::as_str), &widths)
            ));
        }
    }

    push_findings(&mut out, report);
    out.push_str(&format!("\n{rule}\n"));
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    query: &'a str,
    execution_time_ms: f64,
    rows_returned: usize,
    plan: &'a [PlanRow],
    findings: &'a [Finding],
}

fn render_json(report: &ProbeReport) -> anyhow::Result<String> {
    let json = JsonReport {
        query: &report.sql,
        execution_time_ms: report.execution.elapsed_ms(),
        rows_returned: report.execution.row_count,
        plan: &report.plan,
        findings: &report.analysis.findings,
    };
    let mut out = serde_json::to_string_pretty(&json)?;
    out.push('\n');
    Ok(out)
}

fn push_summary(out: &mut String, report: &ProbeReport, query_indent: &str) {
    out.push_str("Original Query:\n");
    out.push_str(&format!("{query_indent}{}\n\n", report.sql));
    out.push_str(&format!(
        "Execution Time: {:.2} ms\n",
        report.execution.elapsed_ms()
    ));
    out.push_str(&format!(
        "Rows Returned: {}\n\n",
        format_count(report.execution.row_count as u64)
    ));
}

fn push_findings(out: &mut String, report: &ProbeReport) {
    let findings = &report.analysis.findings;

    out.push_str("\nProblems Detected:\n");
    if findings.is_empty() {
        out.push_str(&format!("  {NO_ISSUES}\n"));
    }
    for finding in findings {
        out.push_str(&format!(
            "  [{}] {}\n",
            finding.severity.as_str().to_uppercase(),
            finding.message
        ));
    }

    out.push_str("\nOptimization Suggestions:\n");
    if findings.is_empty() {
        out.push_str(&format!("  1. {}\n", report.analysis.summary()));
    }
    for (idx, finding) in findings.iter().enumerate() {
        let severity = finding.severity.as_str().to_uppercase();
        if finding.subject.is_empty() {
            out.push_str(&format!("  {}. [{severity}] {}\n", idx + 1, finding.suggestion));
        } else {
            out.push_str(&format!(
                "  {}. [{severity}] {}: {}\n",
                idx + 1,
                finding.subject,
                finding.suggestion
            ));
        }
    }
}

/// Cell text for every EXPLAIN row, `NULL` for missing values
fn plan_cells(result: &QueryResult) -> Vec<Vec<String>> {
    result
        .rows
        .iter()
        .map(|row| {
            (0..result.column_count())
                .map(|idx| {
                    row.get(idx)
                        .and_then(|value| value.to_text())
                        .unwrap_or_else(|| "NULL".to_string())
                })
                .collect()
        })
        .collect()
}

fn pad_columns<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}
