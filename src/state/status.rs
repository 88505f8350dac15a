//! Backend status state
//!
//! Holds the last successful service-status map and the connection
//! indicator. A failed check only flips the indicator; the previous map is
//! kept as-is.

use crate::api::{HealthResponse, ServiceStatus};
use crate::error::ClientError;

/// Services shown in the settings panel: (key, label)
pub const TRACKED_SERVICES: [(&str, &str); 4] = [
    ("genai", "Language Model"),
    ("embedding", "Semantic Search"),
    ("knowledge_base", "Knowledge Base"),
    ("ml_classifier", "ML Classifier"),
];

/// Connection indicator state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No check has finished yet
    #[default]
    Unknown,
    /// Last check succeeded
    Connected,
    /// Last check failed
    Disconnected,
}

impl ConnectionState {
    /// Indicator text
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Unknown => "Connecting...",
            ConnectionState::Connected => "Connected",
            ConnectionState::Disconnected => "Disconnected",
        }
    }
}

/// Service availability and connection state
#[derive(Debug, Clone, Default)]
pub struct StatusPanel {
    services: ServiceStatus,
    /// Connection indicator
    pub connection: ConnectionState,
    /// Whether a manual connection test is running
    pub testing: bool,
}

impl StatusPanel {
    /// Empty status, connection unknown
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known service map
    pub fn services(&self) -> &ServiceStatus {
        &self.services
    }

    /// Apply the outcome of a health check
    pub fn apply_health(&mut self, result: Result<HealthResponse, ClientError>) {
        match result {
            Ok(health) => {
                tracing::info!(services = health.services.len(), "Health check succeeded");
                self.services = health.services;
                self.connection = ConnectionState::Connected;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Health check failed");
                self.connection = ConnectionState::Disconnected;
            }
        }
    }

    /// Whether the map holds `true` for `key`
    pub fn is_online(&self, key: &str) -> bool {
        self.services.get(key).copied().unwrap_or(false)
    }

    /// Tracked services in display order: (label, online)
    pub fn tracked(&self) -> Vec<(&'static str, bool)> {
        TRACKED_SERVICES
            .iter()
            .map(|(key, label)| (*label, self.is_online(key)))
            .collect()
    }

    /// Every value in the last known map is `true` (vacuously so when empty)
    pub fn all_online(&self) -> bool {
        self.services.values().all(|online| *online)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn health(pairs: &[(&str, bool)]) -> HealthResponse {
        HealthResponse {
            status: Some("healthy".to_string()),
            services: pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    #[test]
    fn test_success_replaces_map() {
        let mut status = StatusPanel::new();
        status.apply_health(Ok(health(&[("genai", true), ("embedding", false)])));
        status.apply_health(Ok(health(&[("genai", false)])));

        assert_eq!(status.connection, ConnectionState::Connected);
        assert_eq!(status.services().len(), 1);
        assert!(!status.is_online("genai"));
    }

    #[test]
    fn test_failure_keeps_previous_map() {
        let mut status = StatusPanel::new();
        status.apply_health(Ok(health(&[("genai", true)])));
        let before = status.services().clone();

        status.apply_health(Err(ClientError::Status {
            status: 503,
            body: String::new(),
        }));

        assert_eq!(status.connection, ConnectionState::Disconnected);
        assert_eq!(status.services(), &before);
    }

    #[test]
    fn test_all_online() {
        let mut status = StatusPanel::new();
        assert!(status.all_online());

        status.apply_health(Ok(health(&[("genai", true), ("embedding", true)])));
        assert!(status.all_online());

        status.apply_health(Ok(health(&[("genai", true), ("embedding", false)])));
        assert!(!status.all_online());
    }

    #[test]
    fn test_tracked_services_in_order() {
        let mut status = StatusPanel::new();
        status.apply_health(Ok(health(&[("genai", true), ("ml_classifier", true)])));
        assert_eq!(
            status.tracked(),
            vec![
                ("Language Model", true),
                ("Semantic Search", false),
                ("Knowledge Base", false),
                ("ML Classifier", true),
            ]
        );
    }
}
