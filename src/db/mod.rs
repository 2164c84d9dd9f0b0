//! Persistence layer: one SQLite-backed store of wardrobe items.

mod connection;
mod items;

pub use connection::{ItemStore, SCHEMA_VERSION, STORE_NAME};
