//! # jotter-session
//!
//! [`SessionStore`](jotter_core::SessionStore) implementations.
//!
//! - [`FileSessionStore`]: the bearer token persisted in a per-user JSON file,
//!   with filesystem notifications for changes made by other processes.
//! - [`MemorySessionStore`]: process-local, for tests and embedding.

pub mod file;
pub mod location;
pub mod memory;

pub use file::{FileSessionStore, SessionWatcher};
pub use location::default_session_path;
pub use memory::MemorySessionStore;
