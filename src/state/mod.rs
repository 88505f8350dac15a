//! State management module
//!
//! Handles chat, knowledge, status and analytics state plus the update loop.

pub mod analytics;
pub mod app_state;
pub mod chat;
pub mod knowledge;
pub mod status;

pub use analytics::Metrics;
pub use app_state::{
    AppState, Confirm, Effect, HealthCheck, Msg, Notice, NoticeLevel, Section, Settings,
};
pub use chat::{ChatSession, ConfidenceTier, Message, MessageMetadata, Sender};
pub use knowledge::KnowledgeCache;
pub use status::{ConnectionState, StatusPanel};
