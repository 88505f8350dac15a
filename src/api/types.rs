//! Wire types for the assistant backend
//!
//! Request and response bodies for `/api/ask`, `/api/knowledge` and `/health`.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of characters shown in a knowledge item preview
pub const PREVIEW_CHARS: usize = 200;

/// Body of `POST /api/ask`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskRequest {
    /// The user's question
    pub question: String,
    /// Extra context; the console always sends an empty string
    #[serde(default)]
    pub context: String,
}

/// Answer returned by `POST /api/ask`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskResponse {
    /// Answer text
    pub answer: String,
    /// Answer certainty in `[0, 1]`
    pub confidence: f64,
    /// Titles of the documents the answer was drawn from
    #[serde(default)]
    pub sources: Vec<String>,
    /// Backend-assigned category label
    #[serde(default)]
    pub classification: String,
}

/// A stored knowledge record as listed by `GET /api/knowledge`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeItem {
    /// Server-assigned identifier, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Title
    pub title: String,
    /// Category label
    pub category: String,
    /// Full content
    pub content: String,
    /// Last update time as sent by the server
    #[serde(default)]
    pub updated_at: String,
}

impl KnowledgeItem {
    /// Create an item without an id (mostly useful for tests and fixtures)
    pub fn new(title: &str, category: &str, content: &str, updated_at: &str) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            category: category.to_string(),
            content: content.to_string(),
            updated_at: updated_at.to_string(),
        }
    }

    /// Content truncated for the list view
    pub fn preview(&self) -> String {
        let mut chars = self.content.chars();
        let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
        if chars.next().is_some() {
            format!("{}...", head)
        } else {
            head
        }
    }

    /// Parsed `updated_at`
    ///
    /// Accepts RFC 3339 as well as the `YYYY-MM-DD HH:MM:SS[.ffffff]` form
    /// SQLite-backed servers emit.
    pub fn updated(&self) -> Option<NaiveDateTime> {
        let raw = self.updated_at.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_utc());
        }
        ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    }

    /// Date shown under each item; falls back to the raw value
    pub fn updated_date(&self) -> String {
        match self.updated() {
            Some(dt) => dt.format("%Y-%m-%d").to_string(),
            None => self.updated_at.clone(),
        }
    }
}

/// Body of `POST /api/knowledge`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewKnowledgeItem {
    /// Title
    pub title: String,
    /// Category label
    pub category: String,
    /// Full content
    pub content: String,
}

impl NewKnowledgeItem {
    /// True when every field holds something other than whitespace
    pub fn is_complete(&self) -> bool {
        [&self.title, &self.category, &self.content]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// Response of `GET /api/knowledge`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeList {
    /// All stored items
    #[serde(default)]
    pub items: Vec<KnowledgeItem>,
}

/// Acknowledgement of `POST /api/knowledge`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAck {
    /// Human-readable message
    #[serde(default)]
    pub message: Option<String>,
    /// Id assigned by the server
    #[serde(default)]
    pub id: Option<i64>,
}

/// Service key to availability
pub type ServiceStatus = BTreeMap<String, bool>;

/// Response of `GET /health`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status string, e.g. `healthy`
    #[serde(default)]
    pub status: Option<String>,
    /// Per-service availability
    #[serde(default)]
    pub services: ServiceStatus,
}
