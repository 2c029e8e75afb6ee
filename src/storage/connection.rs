//! Store connection management.
//!
//! Each stage opens its own connection, uses it for one batch operation and
//! closes it. There is no pool and no process-wide handle.

use log::{debug, error, warn};
use sqlx::{Connection, PgConnection};

use crate::error_handling::StoreError;

/// Opens a connection to the store.
pub async fn connect(database_url: &str) -> Result<PgConnection, StoreError> {
    let conn = PgConnection::connect(database_url).await.map_err(|e| {
        error!("Failed to connect to database: {e}");
        StoreError::Connect(e)
    })?;
    debug!("Database connection opened");
    Ok(conn)
}

/// Closes a connection, logging instead of failing if the goodbye fails.
///
/// The stage's own result has already been decided by the time this runs.
pub async fn close(conn: PgConnection) {
    match conn.close().await {
        Ok(()) => debug!("Database connection closed"),
        Err(e) => warn!("Failed to close database connection cleanly: {e}"),
    }
}
