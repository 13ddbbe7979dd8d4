//! Database migration system.
//!
//! Schema version stored in `PRAGMA user_version`.

use rusqlite::Connection;

use crate::{schema, DbError, Result, SCHEMA_VERSION};

/// Create the schema on a fresh database, accept the current version and
/// reject any other.
pub fn run(conn: &Connection) -> Result<()> {
    let current_version: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(DbError::Sqlite)?;

    match current_version {
        0 => {
            tracing::info!("Initializing database schema v{SCHEMA_VERSION}");
            conn.execute_batch(schema::SCHEMA_V1)
                .map_err(DbError::Sqlite)?;
            conn.pragma_update(None, "user_version", SCHEMA_VERSION)
                .map_err(DbError::Sqlite)?;
        }
        SCHEMA_VERSION => tracing::debug!("schema v{SCHEMA_VERSION} up to date"),
        other => {
            return Err(DbError::Migration(format!(
                "Database version {other} is not supported (expected {SCHEMA_VERSION})"
            )));
        }
    }

    Ok(())
}
