//! SQL text for the destination table.
//!
//! Table names are interpolated into DDL, so they are restricted to plain
//! lowercase identifiers (optionally schema-qualified) and never quoted.

use std::sync::LazyLock;

use regex::Regex;
use strum::IntoEnumIterator;

use crate::config::{FEATURE_INDEX_COLUMN, GEOMETRY_COLUMN, SRID};
use crate::error_handling::StoreError;
use crate::models::Attribute;

static IDENTIFIER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z_][a-z0-9_]{0,62}(\.[a-z_][a-z0-9_]{0,62})?$")
        .expect("identifier pattern is valid")
});

/// Checks that `table` can be interpolated into SQL as-is.
pub fn validate_identifier(table: &str) -> Result<(), StoreError> {
    if IDENTIFIER_PATTERN.is_match(table) {
        Ok(())
    } else {
        Err(StoreError::InvalidIdentifier(table.to_string()))
    }
}

fn attribute_columns() -> Vec<&'static str> {
    Attribute::iter().map(Attribute::column_name).collect()
}

pub(crate) fn drop_table_sql(table: &str) -> String {
    format!("DROP TABLE IF EXISTS {table}")
}

pub(crate) fn create_table_sql(table: &str) -> String {
    let attributes: Vec<String> = attribute_columns()
        .into_iter()
        .map(|c| format!("{c} TEXT"))
        .collect();
    format!(
        "CREATE TABLE {table} ({FEATURE_INDEX_COLUMN} BIGINT NOT NULL, \
         {GEOMETRY_COLUMN} geometry(Point, {SRID}) NOT NULL, {})",
        attributes.join(", ")
    )
}

/// Parameterized insert: `$1` feature index, `$2` geometry text, then one
/// parameter per attribute in [`Attribute`] order.
pub(crate) fn insert_sql(table: &str) -> String {
    let columns = attribute_columns();
    let placeholders: Vec<String> = (0..columns.len()).map(|i| format!("${}", i + 3)).collect();
    format!(
        "INSERT INTO {table} ({FEATURE_INDEX_COLUMN}, {GEOMETRY_COLUMN}, {}) \
         VALUES ($1, ST_GeomFromEWKT($2), {})",
        columns.join(", "),
        placeholders.join(", ")
    )
}

/// Query reading a loaded table back in feature order, geometry as EWKT text.
pub fn default_select_sql(table: &str) -> String {
    format!(
        "SELECT ST_AsEWKT({GEOMETRY_COLUMN}) AS {GEOMETRY_COLUMN}, {} FROM {table} ORDER BY {FEATURE_INDEX_COLUMN}",
        attribute_columns().join(", ")
    )
}
