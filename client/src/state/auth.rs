//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards, the header, and the home switch to coordinate login
//! redirects and role-dependent rendering. The persisted half (token pair and
//! user record) lives in a [`SessionStore`]; this module is the only writer of
//! those keys apart from token refresh in `net::http`.
//!
//! LIFECYCLE
//! =========
//! `AuthState` starts in `loading`, is restored from storage once on hydrate,
//! and is cleared by logout or by the API client's session-expired hook.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::config::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};
use crate::net::types::{LoginResponse, Role, User};
use crate::util::storage::SessionStore;

/// Persisted session: token pair plus the user record captured at login.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub access: String,
    pub refresh: Option<String>,
    pub user: Option<User>,
}

impl Session {
    /// Read the session back from storage. A corrupt user entry is dropped
    /// (and removed) without discarding the tokens.
    pub fn load<S: SessionStore + ?Sized>(store: &S) -> Option<Self> {
        let access = store.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())?;
        let refresh = store.get(REFRESH_TOKEN_KEY).filter(|t| !t.is_empty());
        let user = store.get(USER_KEY).and_then(|raw| match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("discarding unreadable stored user: {e}");
                store.remove(USER_KEY);
                None
            }
        });
        Some(Self { access, refresh, user })
    }

    pub fn save<S: SessionStore + ?Sized>(&self, store: &S) {
        store.set(ACCESS_TOKEN_KEY, &self.access);
        match &self.refresh {
            Some(refresh) => store.set(REFRESH_TOKEN_KEY, refresh),
            None => store.remove(REFRESH_TOKEN_KEY),
        }
        match self.user.as_ref().map(serde_json::to_string) {
            Some(Ok(raw)) => store.set(USER_KEY, &raw),
            Some(Err(e)) => log::warn!("could not persist user: {e}"),
            None => store.remove(USER_KEY),
        }
    }

    pub fn clear<S: SessionStore + ?Sized>(store: &S) {
        store.remove(ACCESS_TOKEN_KEY);
        store.remove(REFRESH_TOKEN_KEY);
        store.remove(USER_KEY);
    }
}

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub authenticated: bool,
    pub loading: bool,
    /// Set by the API client when refresh fails; the app routes to `/login`
    /// and clears the flag.
    pub session_expired: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, authenticated: false, loading: true, session_expired: false }
    }
}

impl AuthState {
    /// Build state from whatever session is persisted.
    pub fn restore<S: SessionStore + ?Sized>(store: &S) -> Self {
        match Session::load(store) {
            Some(session) => Self { user: session.user, authenticated: true, loading: false, session_expired: false },
            None => Self { loading: false, ..Self::default() },
        }
    }

    pub fn login<S: SessionStore + ?Sized>(&mut self, store: &S, response: LoginResponse) {
        let session = Session { access: response.access, refresh: Some(response.refresh), user: response.user };
        session.save(store);
        self.user = session.user;
        self.authenticated = true;
        self.loading = false;
        self.session_expired = false;
    }

    pub fn logout<S: SessionStore + ?Sized>(&mut self, store: &S) {
        Session::clear(store);
        self.user = None;
        self.authenticated = false;
        self.loading = false;
    }

    /// Storage has already been cleared by the API client.
    pub fn expire(&mut self) {
        self.user = None;
        self.authenticated = false;
        self.loading = false;
        self.session_expired = true;
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn display_name(&self) -> String {
        self.user.as_ref().map_or_else(String::new, |u| u.name.clone())
    }
}
