//! Error types for the client
//!
//! Every failure the client can hit resolves to one of these variants.
//! Views turn them into a fallback chat message or a blocking notice.

use thiserror::Error;

/// Client-level error types
#[derive(Error, Debug)]
pub enum ClientError {
    /// Request could not be sent or the connection dropped
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-success HTTP status
    #[error("Server returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, kept for logging
        body: String,
    },

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// A required field was empty; no request was made
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Export file could not be written
    #[error("Export failed: {0}")]
    Export(#[from] std::io::Error),

    /// Export payload could not be serialized
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Async runtime could not be started
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl ClientError {
    /// Whether this error was raised before any network call
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = ClientError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Server returned status 500: boom");
        assert!(!err.is_validation());
    }

    #[test]
    fn test_validation_flag() {
        let err = ClientError::Validation("title is empty".to_string());
        assert!(err.is_validation());
        assert!(err.to_string().contains("title is empty"));
    }
}
