//! Runtime configuration from environment variables

use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_RULES_PATH: &str = "interactions.json";
const DEFAULT_QUERY_URL: &str = "http://localhost:8080/rcms_query";
const DEFAULT_FEEDBACK_URL: &str = "http://localhost:8080/update_feedback";
const DEFAULT_TIMEOUT_SECS: u64 = 300;
const DEFAULT_PORT: u16 = 8000;

/// Remote collaborator endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub query_url: String,
    pub feedback_url: String,
    /// HTTP client timeout; surfaces a hung service as a query failure
    pub timeout: Duration,
}

/// Everything `main` needs to start the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub rules_path: PathBuf,
    pub port: u16,
    pub remote: RemoteConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let timeout_secs = lookup("CHAT_REMOTE_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            rules_path: lookup("CHAT_RULES_PATH")
                .map_or_else(|| PathBuf::from(DEFAULT_RULES_PATH), PathBuf::from),
            port: lookup("CHAT_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            remote: RemoteConfig {
                query_url: lookup("CHAT_QUERY_URL").unwrap_or_else(|| DEFAULT_QUERY_URL.to_string()),
                feedback_url: lookup("CHAT_FEEDBACK_URL")
                    .unwrap_or_else(|| DEFAULT_FEEDBACK_URL.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
        }
    }
}
