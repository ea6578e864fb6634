//! In-memory session store.

use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;

use jotter_core::{Error, Result, SessionBus, SessionEvent, SessionEventOrigin, SessionStore};

/// Process-local session store.
///
/// Clones share the token and the bus, so two clones behave like two
/// contexts over the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    token: Arc<RwLock<Option<String>>>,
    bus: SessionBus,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `token` already stored.
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::default();
        *store.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token.into());
        store
    }

    /// Replace the token as if another context had written the storage.
    ///
    /// Publishes an [`SessionEventOrigin::External`] event.
    pub fn apply_external(&self, token: Option<&str>) {
        self.replace(token.map(String::from));
        self.bus
            .publish(SessionEvent::for_token(token, SessionEventOrigin::External));
    }

    fn replace(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = token;
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Result<Option<String>> {
        Ok(self.token.read().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn set_token(&self, token: &str) -> Result<()> {
        if token.is_empty() {
            return Err(Error::Session("refusing to store an empty token".to_string()));
        }
        self.replace(Some(token.to_string()));
        self.bus
            .publish(SessionEvent::for_token(Some(token), SessionEventOrigin::Local));
        Ok(())
    }

    fn clear_token(&self) -> Result<()> {
        self.replace(None);
        self.bus
            .publish(SessionEvent::for_token(None, SessionEventOrigin::Local));
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.bus.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jotter_core::SessionEventKind;

    #[test]
    fn test_round_trip() {
        let store = MemorySessionStore::new();
        assert!(!store.is_authenticated());

        store.set_token("tok").unwrap();
        assert_eq!(store.token().unwrap().as_deref(), Some("tok"));

        store.clear_token().unwrap();
        assert_eq!(store.token().unwrap(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let a = MemorySessionStore::with_token("tok");
        let b = a.clone();
        b.clear_token().unwrap();
        assert!(!a.is_authenticated());
    }

    #[tokio::test]
    async fn test_external_change_is_published() {
        let store = MemorySessionStore::with_token("tok");
        let mut rx = store.subscribe();

        store.apply_external(None);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.kind, SessionEventKind::SignedOut);
        assert_eq!(event.origin, SessionEventOrigin::External);
        assert!(!store.is_authenticated());
    }
}
