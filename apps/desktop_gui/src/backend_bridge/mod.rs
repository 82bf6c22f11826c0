//! Backend bridge: command queue from the UI thread to the service worker.

pub mod commands;
pub mod runtime;
