//! Ratatui front-end for the wardrobe. The list screen, the add form, and the
//! confirmation dialogs all sit on top of the same [`crate::db::ItemStore`]
//! handle and re-read it after every change.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
