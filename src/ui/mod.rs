//! UI module
//!
//! egui views over `AppState`; each view reports user actions as `Msg` values.

pub mod analytics;
pub mod chat;
pub mod components;
pub mod knowledge;
pub mod layout;
pub mod settings;

pub use layout::render_app_layout;
