//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (SRID, projection radius, defaults)
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{
    CatalogArgs, Cli, Command, Config, DatabaseArgs, ExportArgs, ExportFormat, LoadArgs,
    LogFormat, LogLevel, RunArgs,
};
