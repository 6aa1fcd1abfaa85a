//! Error types for sqlprobe

use thiserror::Error;

/// Core error type for sqlprobe database operations
#[derive(Error, Debug)]
pub enum SqlProbeError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

}

/// Result type alias for sqlprobe operations
pub type Result<T> = std::result::Result<T, SqlProbeError>;
