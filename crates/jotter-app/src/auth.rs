//! Register, login and logout flows.

use std::sync::Arc;

use tracing::{info, warn};

use jotter_core::{Error, LoginRequest, NotesApi, RegisterRequest, Result, SessionStore};

use crate::guard::Route;

/// Binds the notes service to the session store for credential flows.
pub struct AuthService<A: ?Sized, S: ?Sized> {
    api: Arc<A>,
    session: Arc<S>,
}

impl<A, S> AuthService<A, S>
where
    A: NotesApi + ?Sized,
    S: SessionStore + ?Sized,
{
    pub fn new(api: Arc<A>, session: Arc<S>) -> Self {
        Self { api, session }
    }

    /// Create an account and sign in with the issued token.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<Route> {
        require("name", name)?;
        require("email", email)?;
        require("password", password)?;

        let req = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let issued = self.api.register(&req).await.inspect_err(|e| {
            warn!(op = "register", error = %e, "registration failed");
        })?;

        self.session.set_token(&issued.token)?;
        info!(op = "register", "account created, session stored");
        Ok(Route::Notes)
    }

    /// Exchange credentials for a token and store it.
    pub async fn login(&self, email: &str, password: &str) -> Result<Route> {
        require("email", email)?;
        require("password", password)?;

        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let issued = self.api.login(&req).await.inspect_err(|e| {
            warn!(op = "login", error = %e, "login failed");
        })?;

        self.session.set_token(&issued.token)?;
        info!(op = "login", "session stored");
        Ok(Route::Notes)
    }

    pub fn logout(&self) -> Result<Route> {
        self.session.clear_token()?;
        info!(op = "logout", "session cleared");
        Ok(Route::Login)
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{field} is required")));
    }
    Ok(())
}
