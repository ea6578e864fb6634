//! Wire types for the notes API that deserialize strictly.
//!
//! Note payloads are read as raw JSON and go through [`crate::normalize`]
//! instead, since the server's note shape is not trusted.

use serde::Deserialize;

/// Error body returned alongside non-2xx statuses.
///
/// The server uses `error`; some proxies answer with `message`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// The most specific non-empty explanation, if any.
    pub fn into_message(self) -> Option<String> {
        self.error
            .filter(|m| !m.trim().is_empty())
            .or(self.message.filter(|m| !m.trim().is_empty()))
    }
}

/// Body of a successful login or registration.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub token: Option<String>,
}
