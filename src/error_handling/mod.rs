//! Error handling.
//!
//! This module provides the error types of every pipeline stage. Library
//! functions return these typed errors; the run orchestration and the binary
//! wrap them in `anyhow` with stage context.

mod types;

// Re-export public API
pub use types::{
    CatalogError, ExportError, FeatureError, FetchError, GeometryTextError, InitializationError,
    ProjectionError, StoreError,
};
