//! sqlprobe core - shared abstractions for the query probe
//!
//! This crate provides the types every other sqlprobe crate depends on:
//!
//! - `Connection` - the database collaborator (run a query, describe EXPLAIN syntax)
//! - `ConnectionConfig` - connection parameters collected from the command line
//! - `ExplainConfig` - how a dialect spells EXPLAIN
//! - Common types like `Value`, `Row`, `ColumnMeta` and `QueryResult`

mod config;
mod connection;
mod dialect;
mod error;
mod types;

pub use config::*;
pub use connection::*;
pub use dialect::*;
pub use error::*;
pub use types::*;
