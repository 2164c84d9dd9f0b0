use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{ffi, params, Error as SqlError, Row};
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::models::{Category, Season, WardrobeItem};

use super::connection::ItemStore;

impl ToSql for Season {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Season {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|err| FromSqlError::Other(Box::new(err)))
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|err| FromSqlError::Other(Box::new(err)))
    }
}

impl ItemStore {
    /// Insert a new item and return its id. An existing id is reported as
    /// [`StoreError::DuplicateKey`] and leaves the table untouched.
    pub fn add(&self, item: &WardrobeItem) -> Result<String> {
        item.validate()?;

        self.conn
            .execute(
                "INSERT INTO items (id, season, category, description, image_base64, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    item.id,
                    item.season,
                    item.category,
                    item.description,
                    item.image_base64,
                    item.created_at,
                ],
            )
            .map_err(|err| map_duplicate_key(err, &item.id))?;

        debug!(id = %item.id, season = %item.season, category = %item.category, "item added");
        Ok(item.id.clone())
    }

    /// Every stored item in no particular order. Sorting and filtering belong
    /// to the caller.
    pub fn list(&self) -> Result<Vec<WardrobeItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, season, category, description, image_base64, created_at FROM items",
        )?;

        let items = stmt
            .query_map([], item_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(items)
    }

    /// Remove the item with `id`. Missing ids are not an error; the returned
    /// flag only says whether a row was actually removed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM items WHERE id = ?1", params![id])?;

        debug!(id, removed = deleted > 0, "item delete");
        Ok(deleted > 0)
    }

    /// Number of stored items.
    pub fn count(&self) -> Result<usize> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Drop every item. There is no undo.
    pub fn clear(&self) -> Result<()> {
        let removed = self.conn.execute("DELETE FROM items", [])?;
        info!(removed, "wardrobe cleared");
        Ok(())
    }
}

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<WardrobeItem> {
    Ok(WardrobeItem {
        id: row.get(0)?,
        season: row.get(1)?,
        category: row.get(2)?,
        description: row.get(3)?,
        image_base64: row.get(4)?,
        created_at: row.get(5)?,
    })
}

/// Turn a primary-key collision into [`StoreError::DuplicateKey`]; anything
/// else stays a storage error.
fn map_duplicate_key(err: SqlError, id: &str) -> StoreError {
    match &err {
        SqlError::SqliteFailure(failure, _)
            if failure.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            StoreError::DuplicateKey(id.to_string())
        }
        _ => StoreError::Storage(err),
    }
}
