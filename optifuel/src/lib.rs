mod app;
pub mod app_core;
mod background;
pub mod commands;
pub mod events;
pub mod fixtures;
pub mod input;
pub mod localization;
pub mod log_buffer;
pub mod logging;
pub mod models;
mod payments;
pub mod state;
pub mod ui;

pub use app::App;

// Always expose testing module (integration tests need it)
pub mod testing;
