//! Plan Analysis Suggestions Module
//!
//! This module flags common inefficiencies in an execution plan: full table
//! scans, accesses without an index, filesorts and temporary tables. Each
//! finding carries a remediation suggestion.

mod analyzer;

pub use analyzer::*;
