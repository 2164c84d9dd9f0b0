//! Binary entry point: resolve the data directory, start logging, open the
//! item store, and drive the Ratatui event loop until the user exits.
use anyhow::Context;
use tracing::info;
use wardrobe_catalog::{logging, run_app, App, AppConfig, ItemStore};

/// Returning a `Result` bubbles fatal initialization problems (an unreadable
/// data directory, a database from a newer version) up to the terminal.
fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    config.ensure_dirs()?;
    logging::init(&config)?;
    info!(data_dir = %config.data_dir().display(), "starting wardrobe catalog");

    let store = ItemStore::open(config.db_path()).context("failed to open the wardrobe")?;
    let items = store.list().context("failed to load items")?;

    let mut app = App::new(store, config, items);
    let result = run_app(&mut app);

    app.into_store()
        .close()
        .context("failed to close the wardrobe")?;
    result
}
