//! UI layer for desktop GUI: view bindings, pure renderers, and the eframe shell.

pub mod app;
pub mod render;
pub mod views;

pub use app::PolicyGenApp;
