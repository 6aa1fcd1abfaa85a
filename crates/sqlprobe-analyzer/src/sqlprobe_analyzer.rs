//! sqlprobe analyzer - EXPLAIN plan mapping and plan analysis
//!
//! This crate provides functionality for:
//! - Mapping MySQL tabular EXPLAIN output onto typed plan rows
//! - Running the plan rules that flag full scans, missing indexes,
//!   filesorts and temporary tables
//!
//! Nothing in here performs I/O; given the same plan rows the analyzer
//! always produces the same findings in the same order.

pub mod explain;
pub mod suggestions;

pub use explain::*;
pub use suggestions::*;
