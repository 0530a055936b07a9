mod app;
mod cli;
mod effects;
mod logging;
mod persistence;
mod snapshot;
mod ui;

pub use app::run_app;
