//! Whole-result reads into a [`Table`].

use log::info;
use sqlx::postgres::{PgColumn, PgRow};
use sqlx::{Column, Connection, Executor, PgConnection, Row, Statement, TypeInfo};

use crate::error_handling::StoreError;
use crate::models::{Table, Value};
use crate::storage::connection::{close, connect};

/// How a result column is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Text,
    Int2,
    Int4,
    Int8,
    Float4,
    Float8,
    Bool,
}

fn cell_kind(column: &PgColumn) -> Result<CellKind, StoreError> {
    let type_name = column.type_info().name();
    let kind = match type_name {
        "TEXT" | "VARCHAR" | "BPCHAR" | "CHAR" | "NAME" => CellKind::Text,
        "INT2" => CellKind::Int2,
        "INT4" => CellKind::Int4,
        "INT8" => CellKind::Int8,
        "FLOAT4" => CellKind::Float4,
        "FLOAT8" => CellKind::Float8,
        "BOOL" => CellKind::Bool,
        other => {
            return Err(StoreError::UnsupportedColumnType {
                column: column.name().to_string(),
                type_name: other.to_string(),
            })
        }
    };
    Ok(kind)
}

fn decode_cell(row: &PgRow, index: usize, kind: CellKind) -> Result<Value, sqlx::Error> {
    let value = match kind {
        CellKind::Text => row.try_get::<Option<String>, _>(index)?.map(Value::Text),
        CellKind::Int2 => row
            .try_get::<Option<i16>, _>(index)?
            .map(|v| Value::Int(v.into())),
        CellKind::Int4 => row
            .try_get::<Option<i32>, _>(index)?
            .map(|v| Value::Int(v.into())),
        CellKind::Int8 => row.try_get::<Option<i64>, _>(index)?.map(Value::Int),
        CellKind::Float4 => row
            .try_get::<Option<f32>, _>(index)?
            .map(|v| Value::Float(v.into())),
        CellKind::Float8 => row.try_get::<Option<f64>, _>(index)?.map(Value::Float),
        CellKind::Bool => row.try_get::<Option<bool>, _>(index)?.map(Value::Bool),
    };
    Ok(value.unwrap_or(Value::Null))
}

/// Runs `sql` and returns the whole result set.
///
/// The statement is prepared first so column names and types are known even
/// when the result is empty. Geometry columns must be selected as text
/// (`ST_AsEWKT(geom)`); a raw `geometry` column is rejected.
///
/// The query runs in a read-only transaction that is rolled back afterwards,
/// so a statement that tries to write fails with `StoreError::Query`.
pub async fn fetch_table(conn: &mut PgConnection, sql: &str) -> Result<Table, StoreError> {
    let mut tx = conn.begin().await.map_err(StoreError::Transaction)?;
    sqlx::query("SET TRANSACTION READ ONLY")
        .execute(&mut *tx)
        .await
        .map_err(StoreError::Transaction)?;

    let statement = (&mut *tx).prepare(sql).await.map_err(StoreError::Query)?;

    let columns: Vec<String> = statement
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    let kinds = statement
        .columns()
        .iter()
        .map(cell_kind)
        .collect::<Result<Vec<_>, _>>()?;

    let rows = statement
        .query()
        .fetch_all(&mut *tx)
        .await
        .map_err(StoreError::Query)?;
    tx.rollback().await.map_err(StoreError::Transaction)?;

    let mut table = Table::new(columns);
    for row in &rows {
        let mut cells = Vec::with_capacity(kinds.len());
        for (index, kind) in kinds.iter().enumerate() {
            let cell = decode_cell(row, index, *kind).map_err(|source| StoreError::Decode {
                column: table.columns()[index].clone(),
                source,
            })?;
            cells.push(cell);
        }
        table.push_row(cells);
    }

    info!("Read {} rows ({} columns)", table.len(), table.columns().len());
    Ok(table)
}

/// Opens a connection, runs [`fetch_table`] and closes the connection.
pub async fn read_table(database_url: &str, sql: &str) -> Result<Table, StoreError> {
    let mut conn = connect(database_url).await?;
    let result = fetch_table(&mut conn, sql).await;
    close(conn).await;
    result
}
