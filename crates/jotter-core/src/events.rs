//! Session change events and the bus that fans them out.
//!
//! Consumers that care about login/logout happening elsewhere (another store
//! handle, another process sharing the session file) subscribe explicitly;
//! nothing listens implicitly.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

/// What happened to the persisted credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEventKind {
    /// A token was stored (login, registration, or token replacement).
    SignedIn,
    /// The token was removed.
    SignedOut,
}

/// Where the change was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEventOrigin {
    /// Through the same store handle that publishes the event.
    Local,
    /// By some other context writing the shared storage.
    External,
}

/// A change to the session credential.
#[derive(Debug, Clone, Serialize)]
pub struct SessionEvent {
    pub kind: SessionEventKind,
    pub origin: SessionEventOrigin,
    pub occurred_at: DateTime<Utc>,
}

impl SessionEvent {
    pub fn new(kind: SessionEventKind, origin: SessionEventOrigin) -> Self {
        Self {
            kind,
            origin,
            occurred_at: Utc::now(),
        }
    }

    /// Event for a token being present (or absent) after a change.
    pub fn for_token(token: Option<&str>, origin: SessionEventOrigin) -> Self {
        let kind = match token {
            Some(t) if !t.is_empty() => SessionEventKind::SignedIn,
            _ => SessionEventKind::SignedOut,
        };
        Self::new(kind, origin)
    }

    pub fn is_signed_in(&self) -> bool {
        self.kind == SessionEventKind::SignedIn
    }
}

/// Broadcast channel for session changes.
///
/// Cloning shares the underlying channel, so every clone publishes to the
/// same set of subscribers.
#[derive(Debug, Clone)]
pub struct SessionBus {
    tx: broadcast::Sender<SessionEvent>,
}

impl SessionBus {
    /// Create a new bus with the given buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event to all subscribers. Dropped silently if nobody listens.
    pub fn publish(&self, event: SessionEvent) {
        tracing::debug!(
            kind = ?event.kind,
            origin = ?event.origin,
            subscriber_count = self.tx.receiver_count(),
            "session event"
        );
        let _ = self.tx.send(event);
    }

    /// Subscribe to session changes. Each subscriber gets its own stream.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for SessionBus {
    fn default() -> Self {
        Self::new(crate::defaults::SESSION_BUS_CAPACITY)
    }
}
