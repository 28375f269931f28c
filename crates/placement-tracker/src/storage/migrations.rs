//! Schema versioning for the tracker database file.
//!
//! Only the container tables are versioned here. The application records
//! inside a slot are an opaque JSON string to this layer.

use rusqlite::{Connection, OptionalExtension};

use crate::error::{Error, Result};

use super::schema::SCHEMA_STATEMENTS;

/// The current schema version.
pub const CURRENT_VERSION: i32 = 1;

/// Key used to store the schema version in the metadata table.
const VERSION_KEY: &str = "schema_version";

/// Create all tables if missing and stamp the file with [`CURRENT_VERSION`].
///
/// Version 1 is the only layout so far, so an older or unstamped file needs
/// nothing beyond the `CREATE TABLE IF NOT EXISTS` statements.
///
/// # Errors
///
/// Returns an error if schema creation fails or the stored version is
/// unreadable or newer than this build understands.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }

    match stored_version(conn)? {
        Some(version) if version > CURRENT_VERSION => Err(Error::DatabaseMigration {
            message: format!(
                "database schema version {version} is newer than supported version {CURRENT_VERSION}"
            ),
        }),
        Some(CURRENT_VERSION) => Ok(()),
        _ => stamp_version(conn, CURRENT_VERSION),
    }
}

/// The version recorded in the metadata table, if any.
fn stored_version(conn: &Connection) -> Result<Option<i32>> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            [VERSION_KEY],
            |row| row.get(0),
        )
        .optional()?;

    value
        .map(|value| {
            value.parse().map_err(|_| Error::DatabaseMigration {
                message: format!("invalid schema version: {value}"),
            })
        })
        .transpose()
}

fn stamp_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        (VERSION_KEY, version.to_string()),
    )?;
    Ok(())
}
