//! Front-end configuration assembled from the environment and CLI flags.

use std::path::PathBuf;

use dialoguer::Password;

use jotter_client::ClientConfig;
use jotter_core::{defaults, Error, Result};
use jotter_session::default_session_path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub session_path: PathBuf,
}

impl AppConfig {
    /// Read `JOTTER_*` variables; a non-empty `api_url` flag wins over the
    /// environment.
    pub fn from_env(api_url: Option<String>) -> Result<Self> {
        let session_path = default_session_path()?;
        Ok(Self::resolve(ClientConfig::from_env(), api_url, session_path))
    }

    fn resolve(client: ClientConfig, api_url: Option<String>, session_path: PathBuf) -> Self {
        let client = match api_url.filter(|url| !url.trim().is_empty()) {
            Some(url) => client.with_base_url(url),
            None => client,
        };
        Self {
            client,
            session_path,
        }
    }
}

/// Account password from `JOTTER_PASSWORD`, or a hidden prompt.
///
/// Never taken from the command line. `confirm` asks twice (registration).
pub fn read_password(confirm: bool) -> Result<String> {
    choose_password(std::env::var(defaults::PASSWORD_ENV).ok(), || {
        let mut prompt = Password::new().with_prompt("Password");
        if confirm {
            prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
        }
        prompt
            .interact()
            .map_err(|e| Error::Config(format!("Failed to read password: {}", e)))
    })
}

fn choose_password<F>(from_env: Option<String>, prompt: F) -> Result<String>
where
    F: FnOnce() -> Result<String>,
{
    match from_env.filter(|p| !p.is_empty()) {
        Some(password) => Ok(password),
        None => prompt(),
    }
}
