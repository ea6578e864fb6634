//! # jotter-client
//!
//! Typed HTTP client for the jotter notes API.
//!
//! [`ApiClient`] implements [`jotter_core::NotesApi`] over `reqwest`. It
//! attaches the bearer token, folds every transport or status failure into
//! a categorized [`jotter_core::Error`], and normalizes note payloads before
//! they reach callers.
//!
//! # Example
//!
//! ```rust,no_run
//! use jotter_client::{ApiClient, ClientConfig};
//! use jotter_core::NotesApi;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = ApiClient::new(ClientConfig::from_env()).unwrap();
//!     let notes = client.list_notes(Some("my-token"), None).await.unwrap();
//!     println!("{} notes", notes.len());
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::ApiClient;
pub use config::ClientConfig;
