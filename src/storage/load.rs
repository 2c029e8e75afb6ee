//! Full-replace load of a feature batch.

use log::{debug, info};
use sqlx::{Connection, PgConnection};
use strum::IntoEnumIterator;

use crate::config::SRID;
use crate::error_handling::StoreError;
use crate::geometry::GeometryText;
use crate::models::{Attribute, GeoRecord};
use crate::storage::connection::{close, connect};
use crate::storage::schema::{create_table_sql, drop_table_sql, insert_sql, validate_identifier};

/// Options controlling a load.
#[derive(Debug, Clone)]
pub struct LoadOptions<'a> {
    /// Destination table
    pub table: &'a str,
    /// Run `CREATE EXTENSION IF NOT EXISTS postgis` first
    pub create_extension: bool,
}

/// Drops and recreates the destination table, then inserts one row per record.
///
/// Everything runs in one transaction: either the new table with every row is
/// committed, or the previous state is kept.
///
/// # Returns
///
/// The number of rows inserted, always `records.len()` on success.
///
/// # Errors
///
/// Returns `StoreError::InvalidIdentifier` before touching the database if
/// the table name is not a plain identifier; any driver failure otherwise.
pub async fn replace_table(
    conn: &mut PgConnection,
    records: &[GeoRecord],
    options: &LoadOptions<'_>,
) -> Result<u64, StoreError> {
    let table = options.table;
    validate_identifier(table)?;

    let mut tx = conn.begin().await.map_err(StoreError::Transaction)?;

    if options.create_extension {
        sqlx::query("CREATE EXTENSION IF NOT EXISTS postgis")
            .execute(&mut *tx)
            .await
            .map_err(|source| StoreError::Ddl {
                statement: "CREATE EXTENSION postgis".to_string(),
                source,
            })?;
    }

    sqlx::query(&drop_table_sql(table))
        .execute(&mut *tx)
        .await
        .map_err(|source| StoreError::Ddl {
            statement: format!("DROP TABLE {table}"),
            source,
        })?;
    sqlx::query(&create_table_sql(table))
        .execute(&mut *tx)
        .await
        .map_err(|source| StoreError::Ddl {
            statement: format!("CREATE TABLE {table}"),
            source,
        })?;
    debug!("Recreated table {table}");

    let insert = insert_sql(table);
    let mut inserted = 0u64;
    for record in records {
        let geometry = GeometryText::new(SRID, record.location).to_string();
        let mut query = sqlx::query(&insert)
            .bind(record.index as i64)
            .bind(geometry);
        for attribute in Attribute::iter() {
            query = query.bind(record.attributes.get(attribute));
        }
        let result = query
            .execute(&mut *tx)
            .await
            .map_err(|source| StoreError::Insert {
                index: record.index,
                source,
            })?;
        inserted += result.rows_affected();
    }

    tx.commit().await.map_err(StoreError::Transaction)?;
    info!("Loaded {inserted} rows into {table}");
    Ok(inserted)
}

/// Opens a connection, runs [`replace_table`] and closes the connection.
pub async fn load_features(
    database_url: &str,
    records: &[GeoRecord],
    options: &LoadOptions<'_>,
) -> Result<u64, StoreError> {
    validate_identifier(options.table)?;
    let mut conn = connect(database_url).await?;
    let result = replace_table(&mut conn, records, options).await;
    close(conn).await;
    result
}
