//! Core traits for jotter abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::Result;
use crate::events::SessionEvent;
use crate::models::*;

// =============================================================================
// NOTES API
// =============================================================================

/// The remote notes service.
///
/// Each call is a single request/response round trip with no retries.
/// `token` is attached as a bearer credential when present.
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// Create an account; returns the issued token.
    async fn register(&self, req: &RegisterRequest) -> Result<AuthToken>;

    /// Exchange credentials for a token.
    async fn login(&self, req: &LoginRequest) -> Result<AuthToken>;

    /// List notes, filtered server-side by `tag` when one is given.
    async fn list_notes(&self, token: Option<&str>, tag: Option<&str>) -> Result<Vec<Note>>;

    /// Create a note and return the server's authoritative copy.
    async fn create_note(&self, token: Option<&str>, req: &CreateNoteRequest) -> Result<Note>;

    /// Delete a note by id.
    async fn delete_note(&self, token: Option<&str>, id: &str) -> Result<()>;
}

// =============================================================================
// SESSION STORE
// =============================================================================

/// Durable holder of the current bearer token.
///
/// The token is externally mutable (other handles and processes may change
/// it), so callers re-read it per operation instead of caching it.
pub trait SessionStore: Send + Sync {
    /// Current token, or `None` when logged out.
    fn token(&self) -> Result<Option<String>>;

    /// Persist `token`; visible to every subsequent `token()` call.
    fn set_token(&self, token: &str) -> Result<()>;

    /// Remove the persisted token.
    fn clear_token(&self) -> Result<()>;

    /// Subscribe to changes of the persisted token.
    fn subscribe(&self) -> broadcast::Receiver<SessionEvent>;

    /// Whether a non-empty token is present. Read failures count as logged out.
    fn is_authenticated(&self) -> bool {
        match self.token() {
            Ok(Some(token)) => !token.is_empty(),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "session read failed, treating as logged out");
                false
            }
        }
    }
}
