//! Session state for the current authenticated identity
//!
//! The [`Session`] is the single source of truth consumed by every
//! protected-view decision. Invariant: a user is present only if a token
//! is present; the converse is not guaranteed (a token may exist while
//! user resolution is pending or has failed).

use serde::{Deserialize, Serialize};

use super::newtypes::{AuthToken, Email};

/// The resolved user identity, as returned by `GET /users/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend user id; absent on the degraded fallback identity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Account email
    pub email: String,
    /// Optional display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl User {
    /// Minimal fallback identity built from the submitted login email.
    ///
    /// Used when the token exchange succeeded but the follow-up user
    /// resolution failed: the session is still authenticated, with a
    /// degraded identity until the next full resolution.
    pub fn fallback(email: &Email) -> Self {
        Self {
            id: None,
            email: email.as_str().to_string(),
            full_name: None,
        }
    }

    /// True if this identity came from the fallback path rather than the
    /// backend
    pub fn is_degraded(&self) -> bool {
        self.id.is_none()
    }
}

/// Client-held authentication state: token plus resolved user identity.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<AuthToken>,
    user: Option<User>,
    loading: bool,
}

impl Session {
    /// A fresh session at application start: anonymous, still loading
    pub fn starting() -> Self {
        Self {
            token: None,
            user: None,
            loading: true,
        }
    }

    /// The current token, if any
    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    /// The resolved user, if any
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// True while the startup token check has not completed.
    ///
    /// Protected views must neither render nor redirect while this holds.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True iff a user identity is present
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Marks the startup check complete. The only path that clears
    /// `loading`.
    pub fn finish_loading(&mut self) {
        self.loading = false;
    }

    /// Stores a token with no user yet (resolution pending or failed)
    pub fn set_token(&mut self, token: AuthToken) {
        self.token = Some(token);
    }

    /// Stores token and user together
    pub fn authenticate(&mut self, token: AuthToken, user: User) {
        self.token = Some(token);
        self.user = Some(user);
    }

    /// Attaches a user to an existing token.
    ///
    /// Ignored when no token is present, preserving the user-implies-token
    /// invariant.
    pub fn set_user(&mut self, user: User) {
        if self.token.is_some() {
            self.user = Some(user);
        }
    }

    /// Clears the in-memory session. Idempotent; `loading` is untouched.
    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}
