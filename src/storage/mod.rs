//! PostGIS store access.
//!
//! - `connection`: scoped open/close of a single connection
//! - `schema`: DDL and query text for the destination table
//! - `load`: full-replace load of a feature batch
//! - `read`: whole-result reads into a [`Table`](crate::models::Table)

mod connection;
mod load;
mod read;
mod schema;

pub use connection::{close, connect};
pub use load::{load_features, replace_table, LoadOptions};
pub use read::{fetch_table, read_table};
pub use schema::{default_select_sql, validate_identifier};
