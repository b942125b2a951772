//! UI layer for the desktop shell: the single-page app and its sections.

pub mod app;

pub use app::{DojoApp, StartupConfig};
