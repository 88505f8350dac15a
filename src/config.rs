//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::path::PathBuf;

/// Default base URL of the assistant backend
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Default number of tokio worker threads used for network calls
pub const DEFAULT_WORKER_THREADS: usize = 2;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend API configuration
    pub api: ApiConfig,
    /// Chat export configuration
    pub export: ExportConfig,
    /// Async runtime configuration
    pub runtime: RuntimeConfig,
}

/// Backend API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL without a trailing slash, e.g. `http://127.0.0.1:8000`
    pub base_url: String,
}

/// Chat export configuration
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory that exported chat logs are written to
    pub dir: PathBuf,
}

/// Async runtime configuration
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Worker threads for the tokio runtime
    pub worker_threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_API_URL)
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let base_url = env::var("AGENT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let mut config = Self::with_base_url(&base_url);

        if let Ok(dir) = env::var("AGENT_EXPORT_DIR") {
            config.export.dir = PathBuf::from(dir);
        }

        config.runtime.worker_threads = env::var("AGENT_WORKER_THREADS")
            .ok()
            .and_then(|t| t.parse().ok())
            .filter(|t| *t > 0)
            .unwrap_or(DEFAULT_WORKER_THREADS);

        config
    }

    /// Build a configuration pointing at the given API base URL
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
            },
            export: ExportConfig {
                dir: PathBuf::from("."),
            },
            runtime: RuntimeConfig {
                worker_threads: DEFAULT_WORKER_THREADS,
            },
        }
    }

    /// Full URL for an endpoint path such as `/api/ask`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api.base_url, path)
    }
}
