//! Catalog document shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A catalog: named data sources.
///
/// Unknown top-level members (e.g. `metadata`) are ignored on read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Sources by name
    #[serde(default)]
    pub sources: BTreeMap<String, CatalogSource>,
}

/// One data source: a driver bound to a connection and a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSource {
    /// Only `postgres` is supported
    pub driver: String,
    /// Free-form note for catalog readers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Connection and query
    pub args: SourceArgs,
}

/// Driver arguments of a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceArgs {
    /// PostgreSQL connection URI
    pub uri: String,
    /// Read-only SQL text
    pub sql_expr: String,
}
