//! File-backed session store.
//!
//! The token lives in a small JSON document keyed by [`defaults::TOKEN_KEY`]:
//!
//! ```json
//! {"token": "<bearer token>"}
//! ```
//!
//! Every read goes to disk, so a token written by another handle or another
//! process is visible on the next `token()` call. Writes are atomic
//! (temp file + rename). [`FileSessionStore::watch`] turns filesystem
//! notifications into [`SessionEvent`]s with [`SessionEventOrigin::External`].

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use jotter_core::{
    defaults, Error, Result, SessionBus, SessionEvent, SessionEventKind, SessionEventOrigin,
    SessionStore,
};

struct Inner {
    path: PathBuf,
    bus: SessionBus,
    /// Token value this handle last observed or wrote. Held across local
    /// writes so the watcher never mistakes them for external changes.
    last_seen: Mutex<Option<String>>,
}

impl Inner {
    fn last_seen(&self) -> MutexGuard<'_, Option<String>> {
        self.last_seen.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Re-read the file after a filesystem notification and publish if the
    /// token differs from what this handle last saw.
    fn reconcile_external(&self) {
        // Read under the lock so a concurrent local write cannot slip in
        // between the read and the comparison.
        let mut last = self.last_seen();
        let current = match read_token(&self.path) {
            Ok(token) => token,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "session: re-read after change failed");
                return;
            }
        };

        if *last == current {
            return;
        }
        *last = current;
        let event = SessionEvent::for_token(last.as_deref(), SessionEventOrigin::External);
        drop(last);

        info!(kind = ?event.kind, "session: changed by another context");
        self.bus.publish(event);
    }
}

/// Session store persisted in a JSON file.
///
/// Clones share the same bus and change tracking.
#[derive(Clone)]
pub struct FileSessionStore {
    inner: Arc<Inner>,
}

impl FileSessionStore {
    /// Create a store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let initial = read_token(&path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "session: initial read failed");
            None
        });

        Self {
            inner: Arc::new(Inner {
                path,
                bus: SessionBus::default(),
                last_seen: Mutex::new(initial),
            }),
        }
    }

    /// Create a store at the default location (see [`crate::default_session_path`]).
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(crate::location::default_session_path()?))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Start watching the session file for changes made by other contexts.
    ///
    /// Changes are published on this store's bus (see
    /// [`SessionStore::subscribe`]) until the returned watcher is dropped.
    pub fn watch(&self) -> Result<SessionWatcher> {
        let dir = parent_dir(&self.inner.path);
        fs::create_dir_all(&dir)?;

        let file_name = self
            .inner
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .ok_or_else(|| Error::Session(format!("{} is not a file path", self.inner.path.display())))?;

        *self.inner.last_seen() = read_token(&self.inner.path)?;

        let inner = Arc::clone(&self.inner);
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            match res {
                Ok(event) => {
                    let touches_session = event
                        .paths
                        .iter()
                        .any(|p| p.file_name() == Some(file_name.as_os_str()));
                    if touches_session {
                        debug!(kind = ?event.kind, "session: file event");
                        inner.reconcile_external();
                    }
                }
                Err(e) => warn!(error = %e, "session: watch error"),
            }
        })
        .map_err(|e| Error::Session(format!("Failed to create file watcher: {}", e)))?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| Error::Session(format!("Failed to watch {}: {}", dir.display(), e)))?;

        info!(path = %self.inner.path.display(), "session: watching for external changes");
        Ok(SessionWatcher { _watcher: watcher })
    }
}

impl std::fmt::Debug for FileSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSessionStore")
            .field("path", &self.inner.path)
            .finish()
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Result<Option<String>> {
        read_token(&self.inner.path)
    }

    fn set_token(&self, token: &str) -> Result<()> {
        if token.is_empty() {
            return Err(Error::Session("refusing to store an empty token".to_string()));
        }

        let mut last = self.inner.last_seen();
        write_token(&self.inner.path, token)?;
        *last = Some(token.to_string());
        drop(last);

        debug!(path = %self.inner.path.display(), "session: token stored");
        self.inner.bus.publish(SessionEvent::new(
            SessionEventKind::SignedIn,
            SessionEventOrigin::Local,
        ));
        Ok(())
    }

    fn clear_token(&self) -> Result<()> {
        let mut last = self.inner.last_seen();
        match fs::remove_file(&self.inner.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        *last = None;
        drop(last);

        debug!(path = %self.inner.path.display(), "session: token cleared");
        self.inner.bus.publish(SessionEvent::new(
            SessionEventKind::SignedOut,
            SessionEventOrigin::Local,
        ));
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.bus.subscribe()
    }
}

/// Keeps a session file watch alive. Dropping it stops watching.
pub struct SessionWatcher {
    _watcher: RecommendedWatcher,
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Read the token from `path`. Missing or unusable files mean logged out.
fn read_token(path: &Path) -> Result<Option<String>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let value: Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "session: file is not valid JSON, ignoring");
            return Ok(None);
        }
    };

    Ok(value
        .get(defaults::TOKEN_KEY)
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(String::from))
}

/// Atomically replace the session file with one holding `token`.
fn write_token(path: &Path, token: &str) -> Result<()> {
    fs::create_dir_all(parent_dir(path))?;

    let mut doc = Map::new();
    doc.insert(defaults::TOKEN_KEY.to_string(), Value::String(token.to_string()));
    let bytes = serde_json::to_vec(&Value::Object(doc))?;

    // Unique temp file per write; concurrent writers never share one
    let dir = parent_dir(path);
    let mut temp = NamedTempFile::new_in(&dir).map_err(|e| {
        warn!(dir = %dir.display(), error = %e, "session: temp file create failed");
        e
    })?;
    temp.write_all(&bytes)?;
    temp.as_file().sync_all()?;

    // Owner-only: the file holds a credential
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    temp.persist(path).map_err(|e| {
        warn!(to = %path.display(), error = %e.error, "session: rename failed");
        e.error
    })?;

    Ok(())
}
