//! Agent Console Library
//!
//! Desktop client for a conversational assistant backend: chat, knowledge
//! base, analytics and backend status. The binary is in `src/main.rs`.

pub mod api;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod export;
pub mod state;
pub mod ui;
