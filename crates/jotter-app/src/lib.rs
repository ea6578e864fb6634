//! # jotter-app
//!
//! Session-aware state for the jotter notes client.
//!
//! - [`NoteListController`]: the note list, its derived views, and the
//!   add and optimistic-delete flows.
//! - [`RouteGuard`]: which view a path may show given the session.
//! - [`AuthService`]: register, login and logout against the session store.
//!
//! The `jotter` binary in this crate is a terminal front end over these.

pub mod auth;
pub mod config;
pub mod controller;
pub mod guard;
pub mod telemetry;

#[cfg(test)]
mod mock;

pub use auth::AuthService;
pub use config::AppConfig;
pub use controller::{ListState, LoadOutcome, LoadTicket, NoteDraft, NoteListController};
pub use guard::{Navigation, Route, RouteGuard};
