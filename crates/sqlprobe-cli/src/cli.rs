//! sqlprobe - MySQL query performance probe
//!
//! Runs a query against a live MySQL server, times it, asks the server for
//! its EXPLAIN plan on the same session, and reports plan problems with
//! optimization suggestions.
//!
//! Usage:
//!   sqlprobe --host localhost --user root --password secret --database shop \
//!     --query "SELECT * FROM orders ORDER BY created_at"
//!   sqlprobe ... --format json
//!   sqlprobe ... --extended --large-scan-threshold 50000

mod args;
mod logging;
mod report;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use sqlprobe_driver_mysql::MySqlDriver;
use sqlprobe_query::QueryService;

use crate::args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = match logging::init(&args.logging_config()) {
        Ok(guard) => guard,
        Err(e) => {
            // Logging is not available yet, so this goes straight to stderr
            eprintln!("Error: failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "probe failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> anyhow::Result<()> {
    let config = args.connection_config();
    let connection = MySqlDriver::new()
        .connect(&config)
        .await
        .with_context(|| format!("could not connect to {}", config.build_connection_string()))?;

    let service = QueryService::new(args.analyzer_config());
    let outcome = service.probe(connection.as_ref(), &args.query).await;

    if let Err(e) = connection.close().await {
        tracing::warn!(error = %e, "failed to close connection");
    }

    let report = outcome.context("query analysis failed")?;
    let rendered = report::render(&report, args.format).context("failed to render report")?;
    print!("{rendered}");

    Ok(())
}
