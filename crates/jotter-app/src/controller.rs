//! Note list controller.
//!
//! Owns the in-memory note list for the active session and drives it
//! through `Idle -> Loading -> Loaded | Error`. All failures end up as one
//! user-visible message in [`NoteListController::error`]; nothing is
//! propagated to the caller.
//!
//! Loads are tagged with a generation number. Only the most recently begun
//! load may apply its result, and nothing applies after
//! [`NoteListController::unmount`], so a slow response for an old tag
//! filter cannot overwrite a newer one.

use std::sync::Arc;

use tracing::{debug, info, warn};

use jotter_core::{
    defaults, filter_notes, parse_tag_input, tag_vocabulary, CreateNoteRequest, FilterState,
    Note, NotesApi, Result, SessionStore, TagFilter,
};

use crate::guard::Route;

pub const FETCH_FAILED: &str = "Failed to fetch notes.";
pub const ADD_FAILED_PREFIX: &str = "Failed to add note: ";
pub const ID_MISSING: &str = "Cannot delete note: ID is missing.";
pub const DELETE_FAILED: &str = "Failed to delete note. Restoring notes list.";
pub const NOT_AUTHENTICATED: &str = "Not authenticated.";
pub const LOGOUT_FAILED_PREFIX: &str = "Failed to log out: ";

/// Lifecycle of the note list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListState {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<Note>),
    Error(String),
}

/// Contents of the add-note form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    /// Comma-separated tags as typed.
    pub tags: String,
}

/// What a load attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The result (success or failure) was applied to the list.
    Applied,
    /// A newer load began, or the controller was unmounted; result dropped.
    Stale,
    /// No token in the session store; nothing was fetched.
    Unauthenticated,
    /// The tag filter did not change, so no load was started.
    Unchanged,
}

/// A load in flight. Obtained from [`NoteListController::begin_load`].
#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: u64,
    token: String,
    tag: TagFilter,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn tag(&self) -> &TagFilter {
        &self.tag
    }

    /// Run the listing request this ticket stands for.
    pub async fn fetch<A: NotesApi + ?Sized>(&self, api: &A) -> Result<Vec<Note>> {
        api.list_notes(Some(&self.token), self.tag.as_tag()).await
    }
}

/// State holder for the notes view.
pub struct NoteListController<A: ?Sized, S: ?Sized> {
    api: Arc<A>,
    session: Arc<S>,
    state: ListState,
    filter: FilterState,
    draft: NoteDraft,
    error: Option<String>,
    generation: u64,
    mounted: bool,
}

impl<A, S> NoteListController<A, S>
where
    A: NotesApi + ?Sized,
    S: SessionStore + ?Sized,
{
    pub fn new(api: Arc<A>, session: Arc<S>) -> Self {
        Self {
            api,
            session,
            state: ListState::Idle,
            filter: FilterState::default(),
            draft: NoteDraft::default(),
            error: None,
            generation: 0,
            mounted: true,
        }
    }

    /// Start with a tag filter already selected.
    pub fn with_tag_filter(mut self, tag: TagFilter) -> Self {
        self.filter.tag = tag;
        self
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Loaded notes, newest first. Empty unless the list is loaded.
    pub fn notes(&self) -> &[Note] {
        match &self.state {
            ListState::Loaded(notes) => notes,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == ListState::Loading
    }

    /// The current user-visible error message.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut NoteDraft {
        &mut self.draft
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    // -------------------------------------------------------------------------
    // Derived views
    // -------------------------------------------------------------------------

    /// Notes matching the search text, in list order.
    pub fn filtered_notes(&self) -> Vec<&Note> {
        filter_notes(self.notes(), &self.filter.search)
    }

    /// Every tag in the loaded list, first-seen order.
    pub fn all_tags(&self) -> Vec<String> {
        tag_vocabulary(self.notes())
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Load the list for the current filter (re)activating the controller.
    pub async fn mount(&mut self) -> LoadOutcome {
        self.mounted = true;
        self.refresh().await
    }

    /// Stop applying results and drop the in-memory list.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.generation += 1;
        self.state = ListState::Idle;
        self.error = None;
        debug!("note list unmounted");
    }

    /// Change the tag filter, reloading when it differs from the current one.
    pub async fn set_tag_filter(&mut self, tag: TagFilter) -> LoadOutcome {
        if self.filter.tag == tag {
            return LoadOutcome::Unchanged;
        }
        self.filter.tag = tag;
        // Loads for the old filter are stale from here on
        self.generation += 1;
        self.refresh().await
    }

    /// Fetch and apply the list for the current filter.
    pub async fn refresh(&mut self) -> LoadOutcome {
        let Some(ticket) = self.begin_load() else {
            return LoadOutcome::Unauthenticated;
        };
        let result = ticket.fetch(self.api.as_ref()).await;
        self.complete_load(ticket, result)
    }

    /// Enter `Loading` and hand out a ticket for the fetch.
    ///
    /// Every call supersedes loads already in flight. Returns `None` without
    /// a fetch when there is no session; the route guard takes it from there.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        self.generation += 1;
        let Some(token) = self.current_token() else {
            debug!(generation = self.generation, "no session, pending loads invalidated");
            return None;
        };
        self.state = ListState::Loading;

        debug!(generation = self.generation, tag = %self.filter.tag, "loading notes");
        Some(LoadTicket {
            generation: self.generation,
            token,
            tag: self.filter.tag.clone(),
        })
    }

    /// Apply a fetch result if its ticket is still the latest.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<Vec<Note>>) -> LoadOutcome {
        if !self.mounted || ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                mounted = self.mounted,
                "discarding stale notes response"
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(mut notes) => {
                notes.retain(|note| !note.id.is_empty());
                debug!(result_count = notes.len(), tag = %ticket.tag, "notes loaded");
                self.state = ListState::Loaded(notes);
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, tag = %ticket.tag, "failed to fetch notes");
                self.state = ListState::Error(FETCH_FAILED.to_string());
                self.error = Some(FETCH_FAILED.to_string());
            }
        }
        LoadOutcome::Applied
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Create a note and put the server's copy at the front of the list.
    ///
    /// Returns whether the note was added.
    pub async fn add_note(&mut self, title: &str, content: &str, tag_input: &str) -> bool {
        if title.trim().is_empty() {
            self.error = Some(defaults::TITLE_REQUIRED.to_string());
            return false;
        }
        let Some(token) = self.current_token() else {
            self.error = Some(NOT_AUTHENTICATED.to_string());
            return false;
        };

        let req = CreateNoteRequest {
            title: title.to_string(),
            content: content.to_string(),
            tags: parse_tag_input(tag_input),
        };

        let note = match self.api.create_note(Some(&token), &req).await {
            Ok(note) if !note.id.is_empty() => note,
            Ok(_) => {
                warn!("create returned a note without id");
                self.error = Some(format!("{}{}", ADD_FAILED_PREFIX, defaults::INVALID_NOTE));
                return false;
            }
            Err(e) => {
                warn!(error = %e, "failed to add note");
                self.error = Some(format!("{}{}", ADD_FAILED_PREFIX, e));
                return false;
            }
        };

        info!(note_id = %note.id, tag_count = note.tags.len(), "note added");
        match &mut self.state {
            ListState::Loaded(notes) => notes.insert(0, note),
            other => *other = ListState::Loaded(vec![note]),
        }
        self.draft = NoteDraft::default();
        self.error = None;
        true
    }

    /// Submit the held form fields; they are cleared on success.
    pub async fn submit_draft(&mut self) -> bool {
        let draft = self.draft.clone();
        self.add_note(&draft.title, &draft.content, &draft.tags).await
    }

    /// Remove a note immediately, then confirm with the server.
    ///
    /// On failure the list is restored exactly as it was. An empty `id`
    /// records an error and does nothing else. Returns whether the delete
    /// went through.
    pub async fn delete_note_by_id(&mut self, id: &str) -> bool {
        if id.is_empty() {
            warn!("attempted to delete a note without an id");
            self.error = Some(ID_MISSING.to_string());
            return false;
        }
        let Some(token) = self.current_token() else {
            self.error = Some(NOT_AUTHENTICATED.to_string());
            return false;
        };

        let snapshot = self.state.clone();
        if let ListState::Loaded(notes) = &mut self.state {
            notes.retain(|note| note.id != id);
        }

        match self.api.delete_note(Some(&token), id).await {
            Ok(()) => {
                info!(note_id = id, "note deleted");
                self.error = None;
                true
            }
            Err(e) => {
                warn!(note_id = id, error = %e, "delete failed, restoring list");
                self.state = snapshot;
                self.error = Some(DELETE_FAILED.to_string());
                false
            }
        }
    }

    /// Clear the session and the list. Returns where to navigate.
    pub fn logout(&mut self) -> Route {
        if let Err(e) = self.session.clear_token() {
            warn!(error = %e, "failed to clear session");
            self.error = Some(format!("{}{}", LOGOUT_FAILED_PREFIX, e));
            return Route::Notes;
        }
        info!("logged out");
        self.unmount();
        Route::Login
    }

    /// Token for this operation. Read fresh every time; other contexts may
    /// have changed it.
    fn current_token(&self) -> Option<String> {
        match self.session.token() {
            Ok(Some(token)) if !token.is_empty() => Some(token),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "session read failed");
                None
            }
        }
    }
}
