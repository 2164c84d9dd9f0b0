//! Error taxonomy for the item store. Application layers above the store work
//! with `anyhow`, but the store itself returns these typed variants so callers
//! can tell a duplicate id apart from a broken database.

use thiserror::Error;

/// Failures surfaced by [`crate::db::ItemStore`] and the model parsers.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database could not be opened or its schema prepared. Nothing else
    /// works until this is resolved.
    #[error("item store could not be initialized: {0}")]
    Initialization(String),

    /// An item with this id is already stored.
    #[error("an item with id {0:?} already exists")]
    DuplicateKey(String),

    /// Input rejected at the boundary (unknown enum value, incomplete item).
    #[error("invalid item: {0}")]
    Validation(String),

    /// Any other engine failure, carrying SQLite's own diagnostic.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
