//! Client configuration.

use jotter_core::defaults;

/// Configuration for [`crate::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the API, e.g. `https://host/api`.
    pub base_url: String,
    /// Explicit request timeout. `None` keeps the transport default.
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::API_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at `base_url` with no explicit timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: None,
        }
    }

    /// Create from environment variables.
    ///
    /// - `JOTTER_API_URL`: API base (default: hosted API)
    /// - `JOTTER_TIMEOUT_SECS`: request timeout in seconds (default: none)
    pub fn from_env() -> Self {
        let base_url = std::env::var(defaults::API_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| defaults::API_URL.to_string());
        let timeout_secs = std::env::var(defaults::TIMEOUT_SECS_ENV)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0);

        Self {
            base_url,
            timeout_secs,
        }
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Join `endpoint` (starting with `/`) onto the base URL.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint)
    }
}
