//! Core library surface for the wardrobe catalog.
//!
//! The persistence layer ([`ItemStore`]) is the part other tools are expected
//! to reuse; the terminal UI and image helpers are built on top of it and are
//! exported so the binary stays a thin wiring layer.
pub mod config;
pub mod db;
pub mod error;
pub mod images;
pub mod logging;
pub mod models;
pub mod ui;

/// The store handle and the error type every store operation returns.
pub use db::ItemStore;
pub use error::StoreError;

/// Domain types passed between the store and the UI.
pub use models::{Category, Season, WardrobeItem};

pub use config::AppConfig;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
