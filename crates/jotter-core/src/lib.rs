//! # jotter-core
//!
//! Core types, traits, and abstractions for the jotter notes client.
//!
//! This crate provides the note and session data model, the error taxonomy,
//! and the two seams every other crate plugs into: [`NotesApi`] (the remote
//! notes service) and [`SessionStore`] (where the bearer token lives).

pub mod defaults;
pub mod error;
pub mod events;
pub mod models;
pub mod search;
pub mod tags;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use events::{SessionBus, SessionEvent, SessionEventKind, SessionEventOrigin};
pub use models::*;
pub use search::filter_notes;
pub use tags::{parse_tag_input, tag_vocabulary};
pub use traits::*;
