//! HTTP status to error category mapping.

use jotter_core::{defaults, Error};

/// Which family of endpoint produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `/auth/register`, `/auth/login`
    Auth,
    /// `/notes`, `/notes/:id`
    Notes,
}

/// Coarse classification of a non-2xx status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// 401 or 403.
    Unauthorized,
    /// 404.
    NotFound,
    /// Any other 4xx.
    ClientError,
    /// 5xx.
    ServerError,
    /// Anything else that is not a success.
    Unknown,
}

impl ApiErrorCode {
    /// Determine error code from HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::Unauthorized,
            404 => Self::NotFound,
            400..=499 => Self::ClientError,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }
}

/// Convert a failed response into a jotter [`Error`].
///
/// Auth endpoints report every failure as [`Error::Auth`] carrying the
/// server's explanation (duplicate email, wrong password). Notes endpoints
/// only do so for 401/403.
pub fn to_jotter_error(endpoint: Endpoint, status: u16, message: Option<String>) -> Error {
    match (endpoint, ApiErrorCode::from_status(status)) {
        (Endpoint::Auth, _) => {
            Error::Auth(message.unwrap_or_else(|| defaults::AUTH_FALLBACK_MESSAGE.to_string()))
        }
        (Endpoint::Notes, ApiErrorCode::Unauthorized) => {
            Error::Auth(message.unwrap_or_else(|| "Unauthorized".to_string()))
        }
        (Endpoint::Notes, _) => Error::Server {
            status,
            message: message.unwrap_or_else(|| format!("HTTP {}", status)),
        },
    }
}
