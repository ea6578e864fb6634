//! Error types for jotter.

use thiserror::Error;

/// Result type alias using jotter's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for jotter operations.
///
/// Transport-specific failures never leak past the API client: everything is
/// folded into one of these categories before it reaches a caller.
#[derive(Error, Debug)]
pub enum Error {
    /// Bad credentials, duplicate registration, or a rejected bearer token
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// A required field was empty; raised before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// The request never produced an HTTP response
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The response body did not have the expected shape
    #[error("Malformed response: {0}")]
    DataShape(String),

    /// Session storage could not be read or written
    #[error("Session error: {0}")]
    Session(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the failure means the current credentials are not accepted.
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth(_))
    }

    /// HTTP status associated with the failure, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
