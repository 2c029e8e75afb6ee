//! Export of projected tables.
//!
//! This is the hand-off to a map renderer: the projected table is written as
//! CSV or JSON Lines to a file or stdout, with the table's own column names.

mod csv;
mod jsonl;
mod output;

use std::path::Path;

use log::info;

use crate::config::ExportFormat;
use crate::error_handling::ExportError;
use crate::models::Table;

pub use self::csv::write_csv;
pub use self::jsonl::write_jsonl;

/// Writes `table` in `format` to `output` (stdout if `None`).
///
/// Returns the number of rows written.
pub fn export_table(
    table: &Table,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<usize, ExportError> {
    let writer = output::open_output(output)?;
    let written = match format {
        ExportFormat::Csv => write_csv(table, writer)?,
        ExportFormat::Jsonl => write_jsonl(table, writer)?,
    };
    match output {
        Some(path) => info!("Exported {written} rows to {}", path.display()),
        None => info!("Exported {written} rows to stdout"),
    }
    Ok(written)
}
