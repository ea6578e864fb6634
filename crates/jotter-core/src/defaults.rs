//! Centralized default constants for the jotter client.
//!
//! Every crate references these instead of defining its own literals.

// =============================================================================
// API
// =============================================================================

/// Base URL of the hosted notes API.
pub const API_URL: &str = "https://userprojectbackend-production.up.railway.app/api";

/// Environment variable overriding [`API_URL`].
pub const API_URL_ENV: &str = "JOTTER_API_URL";

/// Environment variable setting an explicit request timeout in seconds.
///
/// Unset means the transport default applies.
pub const TIMEOUT_SECS_ENV: &str = "JOTTER_TIMEOUT_SECS";

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

// =============================================================================
// SESSION
// =============================================================================

/// Fixed storage key the bearer token is persisted under.
pub const TOKEN_KEY: &str = "token";

/// Environment variable overriding the session file location.
pub const SESSION_FILE_ENV: &str = "JOTTER_SESSION_FILE";

/// Environment variable supplying the account password non-interactively.
pub const PASSWORD_ENV: &str = "JOTTER_PASSWORD";

/// Directory (under the user config dir) holding the session file.
pub const SESSION_DIR: &str = "jotter";

/// File name of the persisted session.
pub const SESSION_FILE_NAME: &str = "session.json";

/// Buffer capacity for session change broadcasts.
pub const SESSION_BUS_CAPACITY: usize = 32;

// =============================================================================
// MESSAGES
// =============================================================================

/// Fallback message when an auth endpoint fails without an explanation.
pub const AUTH_FALLBACK_MESSAGE: &str = "Something went wrong";

/// Validation message for a missing note title.
pub const TITLE_REQUIRED: &str = "Title is required.";

/// Message for a create response that did not carry a usable note.
pub const INVALID_NOTE: &str = "Invalid note from server";
