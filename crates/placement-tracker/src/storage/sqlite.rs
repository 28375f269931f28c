//! `SQLite` implementation of [`SlotStore`](super::SlotStore).
//!
//! One database file holds every slot as a row in the `slots` table,
//! alongside the schema version in `metadata`.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::migrations;
use super::SlotStore;
use crate::error::{Error, Result};

/// `SQLite`-backed slot store.
///
/// Slots live in the `slots` table of a single database file. Writes are
/// upserts, so each write replaces the previous value in full.
#[derive(Debug)]
pub struct SqliteSlotStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl SqliteSlotStore {
    /// Open or create a slot database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema
    /// initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        migrations::initialize_schema(&conn)?;

        debug!("Database ready at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory slot database for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SlotStore for SqliteSlotStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM slots WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            r"
            INSERT INTO slots (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![key, value],
        )?;
        debug!("Wrote {} bytes to slot {}", value.len(), key);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        let affected = self.conn.execute("DELETE FROM slots WHERE key = ?1", [key])?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> SqliteSlotStore {
        SqliteSlotStore::open_in_memory().expect("failed to create test store")
    }

    fn remove_db_files(db_path: &Path) {
        let _ = std::fs::remove_file(db_path);
        let _ = std::fs::remove_file(db_path.with_extension("db-wal"));
        let _ = std::fs::remove_file(db_path.with_extension("db-shm"));
    }

    #[test]
    fn test_open_in_memory() {
        let store = create_test_store();
        assert_eq!(store.path().to_string_lossy(), ":memory:");
    }

    #[test]
    fn test_read_missing_slot() {
        let store = create_test_store();
        assert!(store.read("placementApplications").unwrap().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let mut store = create_test_store();
        store.write("k", r#"[{"a":1}]"#).unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some(r#"[{"a":1}]"#));
    }

    #[test]
    fn test_write_replaces_whole_value() {
        let mut store = create_test_store();
        store.write("k", "a much longer first value").unwrap();
        store.write("k", "short").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("short"));
    }

    #[test]
    fn test_slots_are_independent() {
        let mut store = create_test_store();
        store.write("one", "1").unwrap();
        store.write("two", "2").unwrap();
        assert_eq!(store.read("one").unwrap().as_deref(), Some("1"));
        assert_eq!(store.read("two").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_remove() {
        let mut store = create_test_store();
        store.write("k", "v").unwrap();
        assert!(store.remove("k").unwrap());
        assert!(!store.remove("k").unwrap());
        assert!(store.read("k").unwrap().is_none());
    }

    #[test]
    fn test_persists_across_reopen() {
        let db_path = std::env::temp_dir().join(format!(
            "placement_tracker_reopen_{}.db",
            std::process::id()
        ));
        remove_db_files(&db_path);

        {
            let mut store = SqliteSlotStore::open(&db_path).unwrap();
            store.write("k", "kept").unwrap();
            assert_eq!(store.path(), db_path);
        }

        let store = SqliteSlotStore::open(&db_path).unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("kept"));

        drop(store);
        remove_db_files(&db_path);
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let root = std::env::temp_dir().join(format!(
            "placement_tracker_nested_{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&root);
        let nested_path = root.join("nested").join("tracker.db");

        let store = SqliteSlotStore::open(&nested_path).unwrap();
        assert!(nested_path.exists());

        drop(store);
        let _ = std::fs::remove_dir_all(&root);
    }
}
