//! Logging and tracing setup for the sqlprobe binary
//!
//! Console output always goes to stderr so stdout carries only the report.
//! When a log directory is configured, a JSON layer writes the same events
//! to a daily rolling file.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const LOG_FILE_PREFIX: &str = "sqlprobe.log";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directory for JSON log files, if any
    pub log_dir: Option<PathBuf>,

    /// Whether to include file/line information in console logs
    pub include_location: bool,

    /// Whether to log span open/close events
    pub enable_spans: bool,

    /// Default log level filter, overridden by RUST_LOG
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            include_location: false,
            enable_spans: false,
            default_filter: "warn".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Debug output from every sqlprobe crate, with span timings
    pub fn verbose() -> Self {
        Self {
            log_dir: None,
            include_location: cfg!(debug_assertions),
            enable_spans: true,
            default_filter: "info,sqlprobe=debug,sqlprobe_core=debug,sqlprobe_driver_mysql=debug,sqlprobe_query=debug,sqlprobe_analyzer=debug".to_string(),
        }
    }

    pub fn with_log_dir(mut self, log_dir: Option<PathBuf>) -> Self {
        self.log_dir = log_dir;
        self
    }
}

/// Initialize the logging system with the given configuration
///
/// The returned guard flushes the file writer on drop and must be held
/// until the program exits.
pub fn init(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    // RUST_LOG takes precedence over the default filter
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    // NEW fires once when the span is created; ENTER would fire on every async
    // re-poll of the awaited futures.
    let span_events = if config.enable_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let mut layers = Vec::new();

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_span_events(span_events.clone())
        .compact()
        .with_filter(env_filter.clone())
        .boxed();
    layers.push(console_layer);

    let mut guard = None;
    if let Some(log_dir) = &config.log_dir {
        std::fs::create_dir_all(log_dir)?;

        let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
        let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(worker_guard);

        let json_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_span_events(span_events)
            .with_ansi(false)
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(non_blocking)
            .with_filter(env_filter)
            .boxed();
        layers.push(json_layer);
    }

    tracing_subscriber::registry().with(layers).try_init()?;

    tracing::debug!(
        log_dir = ?config.log_dir,
        filter = %config.default_filter,
        "logging initialized"
    );

    Ok(guard)
}
