//! Schema checks for note payloads.
//!
//! The listing endpoint is treated leniently: a missing or non-array `notes`
//! field becomes an empty list, and individual notes get defaults for missing
//! fields. A note without an id is never handed to callers.

use jotter_core::{defaults, AuthToken, Error, Note, Result};
use serde_json::Value;
use tracing::warn;

/// Extract a note from a JSON object, filling in defaults.
///
/// Returns `None` when the object has no non-empty `_id` (or `id`).
pub fn note_from_value(value: &Value) -> Option<Note> {
    let id = ["_id", "id"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|id| !id.is_empty())?
        .to_string();

    let text = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let tags = value
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .filter(|tag| !tag.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    Some(Note {
        id,
        title: text("title"),
        content: text("content"),
        tags,
    })
}

/// Notes from a listing body `{ "notes": [...] }`.
pub fn notes_from_body(body: &Value) -> Vec<Note> {
    let Some(items) = body.get("notes").and_then(Value::as_array) else {
        warn!(
            op = "list_notes",
            "response has no notes array, treating as empty"
        );
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let note = note_from_value(item);
            if note.is_none() {
                warn!(op = "list_notes", "dropping note without id");
            }
            note
        })
        .collect()
}

/// The created note from a body `{ "status": ..., "note": {...} }`.
pub fn created_note_from_body(body: &Value) -> Result<Note> {
    body.get("note")
        .and_then(note_from_value)
        .ok_or_else(|| Error::DataShape(defaults::INVALID_NOTE.to_string()))
}

/// Token from a login/registration body.
pub fn token_from_body(token: Option<String>) -> Result<AuthToken> {
    match token {
        Some(token) if !token.is_empty() => Ok(AuthToken { token }),
        _ => Err(Error::DataShape("response did not include a token".to_string())),
    }
}
