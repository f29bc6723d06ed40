//! UI layer: app shell, per-view rendering, and the save-dialog export sink.

pub mod app;
pub mod save_dialog;
mod views;

pub use app::HireApp;
