//! Chat log export
//!
//! Serializes the message log to a pretty-printed JSON array written to
//! `chat-export-<YYYY-MM-DD>.json`.

use crate::error::ClientError;
use crate::state::chat::{Message, MessageMetadata};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One exported message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportEntry {
    /// ISO-8601 timestamp with millisecond precision
    pub timestamp: String,
    /// `user` or `bot`
    pub sender: String,
    /// Message body
    pub message: String,
    /// Answer metadata
    pub metadata: MessageMetadata,
}

impl From<&Message> for ExportEntry {
    fn from(message: &Message) -> Self {
        Self {
            timestamp: message
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            sender: message.sender.as_str().to_string(),
            message: message.text.clone(),
            metadata: message.metadata.clone(),
        }
    }
}

/// File name for an export made on `date`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("chat-export-{}.json", date.format("%Y-%m-%d"))
}

/// Serialize entries to the exported JSON document
pub fn to_json(entries: &[ExportEntry]) -> Result<String, ClientError> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Write an export into `dir`
///
/// # Returns
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(ClientError)` - If serialization or the write failed
pub fn write_export(
    dir: &Path,
    entries: &[ExportEntry],
    now: DateTime<Utc>,
) -> Result<PathBuf, ClientError> {
    let json = to_json(entries)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(now.date_naive()));
    fs::write(&path, json)?;

    tracing::info!(
        path = %path.display(),
        messages = entries.len(),
        "Chat exported"
    );
    Ok(path)
}
