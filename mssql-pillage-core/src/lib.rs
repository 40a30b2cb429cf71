//! Core types and report pipeline for the mssql-pillage scanner.
//!
//! This crate holds everything the scanner binary needs that does not talk
//! to a server: the sensitive-pattern list and the catalog queries built
//! from it, target list resolution, scan configuration and credentials, the
//! per-server result model, and the report writer.
//!
//! # Security Guarantees
//! - All database operations are read-only; sessions request read-only
//!   application intent
//! - Credentials are zeroized on drop and never logged
//! - No state persists beyond the processing of one server

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod patterns;
pub mod report;
pub mod targets;

// Re-export commonly used types
pub use config::{Credentials, ScanConfig};
pub use error::{PillageError, Result};
pub use logging::init_logging;
pub use models::{ColumnFinding, ColumnMatch, DatabaseFindings, ServerReport};
