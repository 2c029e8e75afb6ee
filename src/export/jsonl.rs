//! JSON Lines export of a projected table.
//!
//! Each line is one JSON object keyed by column name, in column order.

use std::io::Write;

use serde_json::{Map, Value as JsonValue};

use crate::error_handling::ExportError;
use crate::models::Table;

/// Writes `table` as JSON Lines and returns the number of rows written.
pub fn write_jsonl<W: Write>(table: &Table, mut out: W) -> Result<usize, ExportError> {
    for row in table.rows() {
        let mut object = Map::with_capacity(row.len());
        for (column, cell) in table.columns().iter().zip(row) {
            object.insert(column.clone(), serde_json::to_value(cell)?);
        }
        serde_json::to_writer(&mut out, &JsonValue::Object(object))?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(table.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Value;

    #[test]
    fn test_write_jsonl_one_object_per_row() {
        let mut table = Table::new(vec!["name".to_string(), "x".to_string(), "zip".to_string()]);
        table.push_row(vec![
            Value::Text("Depot".to_string()),
            Value::Float(2.5),
            Value::Null,
        ]);
        table.push_row(vec![
            Value::Text("Hall".to_string()),
            Value::Float(-1.0),
            Value::Text("60602".to_string()),
        ]);

        let mut buf = Vec::new();
        assert_eq!(write_jsonl(&table, &mut buf).unwrap(), 2);

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: JsonValue = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["name"], "Depot");
        assert_eq!(first["x"], 2.5);
        assert!(first["zip"].is_null());

        let second: JsonValue = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["zip"], "60602");
    }
}
