//! Terminal front end: command input, effect execution and text rendering.
mod app;
mod effects;
mod logging;
mod ui;

pub use app::run_app;
