use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, OpenFlags, TransactionBehavior};
use tracing::{debug, info};

use crate::error::{Result, StoreError};

/// Logical store name. The on-disk file is named after it.
pub const STORE_NAME: &str = "WardrobeDB";
/// Schema version written to `PRAGMA user_version` once the tables exist.
pub const SCHEMA_VERSION: u32 = 1;
/// How long a second opener waits for another process holding the schema lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to an opened wardrobe database. Every item operation lives on this
/// type, so holding one means the schema is already in place.
pub struct ItemStore {
    pub(super) conn: Connection,
    path: Option<PathBuf>,
}

impl ItemStore {
    /// Open (creating if needed) the database at `path` and make sure the
    /// schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| {
                StoreError::Initialization(format!(
                    "failed to create data directory {}: {err}",
                    parent.display()
                ))
            })?;
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )
        .map_err(|err| {
            StoreError::Initialization(format!("failed to open {}: {err}", path.display()))
        })?;

        let store = Self::prepare(conn, Some(path.to_path_buf()))?;
        info!(path = %path.display(), "item store opened");
        Ok(store)
    }

    /// Open a private in-memory store. Handy for tests: every call starts
    /// from an empty wardrobe.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|err| StoreError::Initialization(err.to_string()))?;
        Self::prepare(conn, None)
    }

    /// Release the connection, surfacing any error SQLite reports while
    /// closing.
    pub fn close(self) -> Result<()> {
        let ItemStore { conn, path } = self;
        conn.close().map_err(|(_, err)| StoreError::Storage(err))?;
        if let Some(path) = path {
            info!(path = %path.display(), "item store closed");
        }
        Ok(())
    }

    /// File backing this store, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Version recorded in the database header.
    pub fn schema_version(&self) -> Result<u32> {
        Ok(read_user_version(&self.conn)?)
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    fn prepare(mut conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|err| StoreError::Initialization(err.to_string()))?;
        ensure_schema(&mut conn)?;
        Ok(Self { conn, path })
    }
}

/// Create the `items` table and its indexes when the database is new. The
/// version check is repeated after taking the write lock so two openers racing
/// on one file run the creation step exactly once.
fn ensure_schema(conn: &mut Connection) -> Result<()> {
    let init_err = |err: rusqlite::Error| {
        StoreError::Initialization(format!("failed to prepare {STORE_NAME} schema: {err}"))
    };

    if read_user_version(conn).map_err(init_err)? == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(init_err)?;

    let version = read_user_version(&tx).map_err(init_err)?;
    if version > SCHEMA_VERSION {
        return Err(StoreError::Initialization(format!(
            "{STORE_NAME} schema version {version} is newer than supported version {SCHEMA_VERSION}"
        )));
    }

    if version < SCHEMA_VERSION {
        tx.execute_batch(
            "CREATE TABLE IF NOT EXISTS items (
                id TEXT PRIMARY KEY NOT NULL,
                season TEXT NOT NULL,
                category TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                image_base64 TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS items_season ON items (season);
            CREATE INDEX IF NOT EXISTS items_category ON items (category);
            CREATE INDEX IF NOT EXISTS items_created_at ON items (created_at);",
        )
        .map_err(init_err)?;
        tx.pragma_update(None, "user_version", SCHEMA_VERSION)
            .map_err(init_err)?;
        debug!(from = version, to = SCHEMA_VERSION, "created items schema");
    }

    tx.commit().map_err(init_err)
}

fn read_user_version(conn: &Connection) -> rusqlite::Result<u32> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_store_records_schema_version() {
        let store = ItemStore::open_in_memory().unwrap();
        assert_eq!(store.schema_version().unwrap(), SCHEMA_VERSION);
        assert!(store.path().is_none());
    }

    #[test]
    fn schema_creation_is_idempotent() {
        let mut store = ItemStore::open_in_memory().unwrap();
        ensure_schema(&mut store.conn).unwrap();
        ensure_schema(&mut store.conn).unwrap();
        assert_eq!(store.schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn secondary_indexes_exist() {
        let store = ItemStore::open_in_memory().unwrap();
        let mut stmt = store
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = 'items' ORDER BY name")
            .unwrap();
        let names: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<rusqlite::Result<_>>()
            .unwrap();
        for expected in ["items_category", "items_created_at", "items_season"] {
            assert!(names.iter().any(|n| n == expected), "missing {expected}");
        }
    }
}
