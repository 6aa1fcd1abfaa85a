//! sqlprobe query - runs a statement, asks for its plan and analyzes it
//!
//! `QueryService` is the only entry point. It talks to the database through
//! `sqlprobe_core::Connection` and hands the plan to `sqlprobe_analyzer`.

mod error;
mod service;
mod view_models;

pub use error::{QueryServiceError, QueryServiceResult};
pub use service::QueryService;
pub use view_models::{ExecutionStats, ProbeReport};
