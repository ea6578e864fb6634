//! In-process notes service for unit tests.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use jotter_core::{
    AuthToken, CreateNoteRequest, Error, LoginRequest, Note, NotesApi, RegisterRequest, Result,
};

/// One recorded call against the mock.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub op: &'static str,
    pub token: Option<String>,
    pub arg: Option<String>,
}

#[derive(Default)]
struct State {
    notes: Mutex<Vec<Note>>,
    calls: Mutex<Vec<MockCall>>,
    created: Mutex<Vec<CreateNoteRequest>>,
    next_id: AtomicU64,
    fail_auth: AtomicBool,
    fail_list: AtomicBool,
    fail_create: AtomicBool,
    fail_delete: AtomicBool,
    create_without_id: AtomicBool,
}

/// Clones share one server-side store.
#[derive(Clone, Default)]
pub struct MockNotesApi {
    state: Arc<State>,
}

impl MockNotesApi {
    pub fn with_notes(notes: Vec<Note>) -> Self {
        let api = Self::default();
        *api.state.notes.lock().unwrap() = notes;
        api
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.state.calls.lock().unwrap().clone()
    }

    pub fn stored_ids(&self) -> Vec<String> {
        self.state
            .notes
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.id.clone())
            .collect()
    }

    pub fn last_created(&self) -> Option<CreateNoteRequest> {
        self.state.created.lock().unwrap().last().cloned()
    }

    pub fn fail_auth(&self, fail: bool) {
        self.state.fail_auth.store(fail, Ordering::SeqCst);
    }

    pub fn fail_list(&self, fail: bool) {
        self.state.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn fail_create(&self, fail: bool) {
        self.state.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn fail_delete(&self, fail: bool) {
        self.state.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn create_without_id(&self, enabled: bool) {
        self.state.create_without_id.store(enabled, Ordering::SeqCst);
    }

    fn record(&self, op: &'static str, token: Option<&str>, arg: Option<&str>) {
        self.state.calls.lock().unwrap().push(MockCall {
            op,
            token: token.map(String::from),
            arg: arg.map(String::from),
        });
    }

    fn issue_token(&self, email: &str) -> Result<AuthToken> {
        if self.state.fail_auth.load(Ordering::SeqCst) {
            return Err(Error::Auth("Invalid credentials".to_string()));
        }
        Ok(AuthToken {
            token: format!("token-for-{email}"),
        })
    }
}

#[async_trait]
impl NotesApi for MockNotesApi {
    async fn register(&self, req: &RegisterRequest) -> Result<AuthToken> {
        self.record("register", None, Some(&req.email));
        self.issue_token(&req.email)
    }

    async fn login(&self, req: &LoginRequest) -> Result<AuthToken> {
        self.record("login", None, Some(&req.email));
        self.issue_token(&req.email)
    }

    async fn list_notes(&self, token: Option<&str>, tag: Option<&str>) -> Result<Vec<Note>> {
        self.record("list", token, tag);
        if self.state.fail_list.load(Ordering::SeqCst) {
            return Err(Error::Server {
                status: 500,
                message: "list exploded".to_string(),
            });
        }
        let notes = self.state.notes.lock().unwrap();
        Ok(notes
            .iter()
            .filter(|n| tag.map_or(true, |t| n.tags.iter().any(|nt| nt == t)))
            .cloned()
            .collect())
    }

    async fn create_note(&self, token: Option<&str>, req: &CreateNoteRequest) -> Result<Note> {
        self.record("create", token, Some(&req.title));
        self.state.created.lock().unwrap().push(req.clone());
        if self.state.fail_create.load(Ordering::SeqCst) {
            return Err(Error::Server {
                status: 500,
                message: "create exploded".to_string(),
            });
        }

        let id = if self.state.create_without_id.load(Ordering::SeqCst) {
            String::new()
        } else {
            format!("m{}", self.state.next_id.fetch_add(1, Ordering::SeqCst) + 1)
        };
        let note = Note {
            id,
            title: req.title.clone(),
            content: req.content.clone(),
            tags: req.tags.clone(),
        };
        self.state.notes.lock().unwrap().insert(0, note.clone());
        Ok(note)
    }

    async fn delete_note(&self, token: Option<&str>, id: &str) -> Result<()> {
        self.record("delete", token, Some(id));
        if self.state.fail_delete.load(Ordering::SeqCst) {
            return Err(Error::Server {
                status: 503,
                message: "delete exploded".to_string(),
            });
        }
        // Missing ids succeed, matching a 404 from the real service
        self.state.notes.lock().unwrap().retain(|n| n.id != id);
        Ok(())
    }
}
