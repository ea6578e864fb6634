//! Route guard: which view a path renders given the session state.

use std::fmt;
use std::sync::Arc;

use tokio::sync::broadcast;

use jotter_core::{SessionEvent, SessionStore};

/// Views of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Notes,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Notes => "/notes",
        }
    }

    /// Match a path, ignoring query string, fragment, trailing slashes and case.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/').to_ascii_lowercase();
        match path.as_str() {
            "/login" => Some(Self::Login),
            "/register" => Some(Self::Register),
            "/notes" => Some(Self::Notes),
            _ => None,
        }
    }

    /// Only reachable with a session.
    pub fn requires_auth(self) -> bool {
        matches!(self, Self::Notes)
    }

    /// Only meaningful without a session.
    pub fn is_auth_only(self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Result of resolving a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Show this view.
    Render(Route),
    /// Go to this view instead.
    Redirect(Route),
}

impl Navigation {
    /// The view that ends up on screen.
    pub fn route(self) -> Route {
        match self {
            Self::Render(route) | Self::Redirect(route) => route,
        }
    }

    pub fn is_redirect(self) -> bool {
        matches!(self, Self::Redirect(_))
    }
}

/// Gates views on whether the session store holds a token.
pub struct RouteGuard<S: ?Sized> {
    session: Arc<S>,
}

impl<S: SessionStore + ?Sized> RouteGuard<S> {
    pub fn new(session: Arc<S>) -> Self {
        Self { session }
    }

    /// Re-reads the store on every call.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Entry point for unknown paths.
    pub fn default_route(&self) -> Route {
        if self.is_authenticated() {
            Route::Notes
        } else {
            Route::Login
        }
    }

    /// Decide what `path` shows.
    pub fn resolve(&self, path: &str) -> Navigation {
        let authenticated = self.is_authenticated();
        let navigation = match Route::from_path(path) {
            Some(route) if route.requires_auth() && !authenticated => {
                Navigation::Redirect(Route::Login)
            }
            Some(route) if route.is_auth_only() && authenticated => {
                Navigation::Redirect(Route::Notes)
            }
            Some(route) => Navigation::Render(route),
            None if authenticated => Navigation::Redirect(Route::Notes),
            None => Navigation::Redirect(Route::Login),
        };

        tracing::debug!(path, authenticated, ?navigation, "route resolved");
        navigation
    }

    /// Session changes from any context; re-resolve when one arrives.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.session.subscribe()
    }
}
