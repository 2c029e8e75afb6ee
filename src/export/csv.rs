//! CSV export of a projected table.
//!
//! One header row with the column names, then one record per row. Null cells
//! are written as empty fields.

use std::io::Write;

use csv::Writer;

use crate::error_handling::ExportError;
use crate::models::Table;

/// Writes `table` as CSV and returns the number of data rows written.
pub fn write_csv<W: Write>(table: &Table, out: W) -> Result<usize, ExportError> {
    let mut writer = Writer::from_writer(out);
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| cell.to_field()))?;
    }
    writer.flush()?;
    Ok(table.len())
}
