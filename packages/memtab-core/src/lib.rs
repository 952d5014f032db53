//! Core of the in-memory tabular store.
//!
//! Provides the value model, tables with auto-increment ids and an optional
//! secondary index, per-database table registries, and the process-wide
//! database manager.

pub mod config;
pub mod database;
pub mod error;
pub mod manager;
pub mod table;
pub mod value;

pub use database::{Database, TableHandle};
pub use error::DbError;
pub use manager::DatabaseManager;
pub use table::{Row, RowId, Table};
pub use value::Value;
