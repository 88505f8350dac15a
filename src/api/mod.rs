//! Backend API module
//!
//! Wire types and the HTTP client used to talk to the assistant backend.

pub mod client;
pub mod types;

pub use client::{AgentApi, ApiClient, ASK_PATH, HEALTH_PATH, KNOWLEDGE_PATH};
pub use types::{
    AskRequest, AskResponse, CreateAck, HealthResponse, KnowledgeItem, KnowledgeList,
    NewKnowledgeItem, ServiceStatus,
};
