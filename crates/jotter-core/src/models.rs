//! Core data models for jotter.
//!
//! These types are shared across all jotter crates and represent the notes
//! service's domain entities as the client sees them.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// NOTE TYPES
// =============================================================================

/// A note as returned by the notes service.
///
/// `id` is assigned by the server and never empty once a note exists on the
/// client. Notes are never edited in place; the list only changes by
/// replacing it wholesale or adding/removing by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Labels in the order the server returned them.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Note {
    /// Whether `needle` (already lowercased) occurs in the title or content,
    /// ignoring case.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }
}

/// Body of a create-note request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

// =============================================================================
// AUTH TYPES
// =============================================================================

/// Body of a registration request.
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of a login request.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Bearer credential issued by a successful login or registration.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AuthToken {
    pub token: String,
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("token", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// FILTER TYPES
// =============================================================================

/// Server-side tag filter for note listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

impl TagFilter {
    /// Build a filter from user input; blank input means all tags.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            Self::All
        } else {
            Self::Tag(trimmed.to_string())
        }
    }

    /// The tag to send as the `tag` query parameter, if any.
    pub fn as_tag(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Tag(tag) => Some(tag.as_str()),
        }
    }
}

impl From<Option<String>> for TagFilter {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::All, |tag| Self::parse(&tag))
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Tag(tag) => write!(f, "{}", tag),
        }
    }
}

/// Transient view filters. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Case-insensitive substring matched against title or content.
    pub search: String,
    pub tag: TagFilter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_deserializes_underscore_id() {
        let note: Note = serde_json::from_value(serde_json::json!({
            "_id": "abc123",
            "title": "Groceries",
            "content": "",
            "tags": ["food"]
        }))
        .unwrap();
        assert_eq!(note.id, "abc123");
        assert_eq!(note.tags, vec!["food".to_string()]);
    }

    #[test]
    fn test_note_deserializes_plain_id_and_defaults() {
        let note: Note =
            serde_json::from_value(serde_json::json!({"id": "n1", "title": "T"})).unwrap();
        assert_eq!(note.id, "n1");
        assert!(note.content.is_empty());
        assert!(note.tags.is_empty());
    }

    #[test]
    fn test_matches_lowercase() {
        let note = Note {
            id: "1".to_string(),
            title: "Shopping List".to_string(),
            content: "Milk and EGGS".to_string(),
            tags: vec![],
        };
        assert!(note.matches_lowercase("shopping"));
        assert!(note.matches_lowercase("eggs"));
        assert!(!note.matches_lowercase("bread"));
    }

    #[test]
    fn test_tag_filter_parse() {
        assert_eq!(TagFilter::parse(""), TagFilter::All);
        assert_eq!(TagFilter::parse("   "), TagFilter::All);
        assert_eq!(TagFilter::parse(" work "), TagFilter::Tag("work".to_string()));
        assert_eq!(TagFilter::from(None), TagFilter::All);
        assert_eq!(
            TagFilter::from(Some("home".to_string())).as_tag(),
            Some("home")
        );
        assert_eq!(TagFilter::All.as_tag(), None);
        assert_eq!(TagFilter::All.to_string(), "all");
    }

    #[test]
    fn test_credentials_debug_redacts_secrets() {
        let login = LoginRequest {
            email: "a@b.c".to_string(),
            password: "hunter2".to_string(),
        };
        let rendered = format!("{:?}", login);
        assert!(rendered.contains("a@b.c"));
        assert!(!rendered.contains("hunter2"));

        let token = AuthToken {
            token: "secret-token".to_string(),
        };
        assert!(!format!("{:?}", token).contains("secret-token"));
    }

    #[test]
    fn test_create_request_serializes_tags_array() {
        let req = CreateNoteRequest {
            title: "Groceries".to_string(),
            content: String::new(),
            tags: vec!["food".to_string(), "urgent".to_string()],
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["tags"], serde_json::json!(["food", "urgent"]));
        assert_eq!(value["content"], "");
    }
}
