//! Default session file location.

use std::path::PathBuf;

use jotter_core::{defaults, Error, Result};

/// Resolve where the session file lives.
///
/// `JOTTER_SESSION_FILE` wins when set; otherwise
/// `<user config dir>/jotter/session.json`.
pub fn default_session_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(defaults::SESSION_FILE_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    dirs::config_dir()
        .map(|dir| dir.join(defaults::SESSION_DIR).join(defaults::SESSION_FILE_NAME))
        .ok_or_else(|| Error::Config("could not determine the user config directory".to_string()))
}
