// ABOUTME: Session snapshot model and the session manager that owns it
// ABOUTME: Snapshots are immutable; every operation publishes a new one through a watch channel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

//! Session
//!
//! A [`Session`] is the client's view of who is logged in. It is never
//! mutated in place: [`SessionManager`] derives the next snapshot from the
//! current one and publishes it, so observers holding a
//! `watch::Receiver<Session>` always see a consistent value.
//!
//! ```text
//! Unauthenticated -> Authenticating -> Authenticated -> LoggingOut -> Unauthenticated
//!                          |
//!                          +-> Offline (token kept, profile unreachable)
//! ```

/// Session operations
pub mod manager;

pub use manager::SessionManager;

use metafit_core::models::User;
use serde::Serialize;
use std::fmt;

/// Lifecycle position of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No credential
    Unauthenticated,
    /// Login, registration, or restore in flight
    Authenticating,
    /// Credential and profile both present
    Authenticated,
    /// Credential being discarded
    LoggingOut,
    /// Credential restored from storage but the profile could not be fetched
    Offline,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Authenticating => "authenticating",
            Self::Authenticated => "authenticated",
            Self::LoggingOut => "logging out",
            Self::Offline => "offline",
        };
        f.write_str(label)
    }
}

/// Immutable snapshot of the session
///
/// `user` is present only if `token` is present; the constructors below are
/// the only way to build one.
#[derive(Clone, PartialEq)]
pub struct Session {
    state: SessionState,
    token: Option<String>,
    user: Option<User>,
    loading: bool,
    error: Option<String>,
}

impl Session {
    /// Logged out, idle, no error
    #[must_use]
    pub const fn unauthenticated() -> Self {
        Self {
            state: SessionState::Unauthenticated,
            token: None,
            user: None,
            loading: false,
            error: None,
        }
    }

    /// Authenticated with a profile
    #[must_use]
    pub const fn authenticated(token: String, user: User) -> Self {
        Self {
            state: SessionState::Authenticated,
            token: Some(token),
            user: Some(user),
            loading: false,
            error: None,
        }
    }

    /// Credential kept but the profile is unavailable
    #[must_use]
    pub fn offline(token: String, error: impl Into<String>) -> Self {
        Self {
            state: SessionState::Offline,
            token: Some(token),
            user: None,
            loading: false,
            error: Some(error.into()),
        }
    }

    /// Request in flight; carries over the current token and user
    #[must_use]
    pub(crate) fn begin(&self, state: SessionState) -> Self {
        Self {
            state,
            loading: true,
            error: None,
            ..self.clone()
        }
    }

    /// Restore in flight with a token read from storage and no profile yet
    #[must_use]
    pub(crate) const fn restoring(token: String) -> Self {
        Self {
            state: SessionState::Authenticating,
            token: Some(token),
            user: None,
            loading: true,
            error: None,
        }
    }

    /// Same session, idle, with an error message
    #[must_use]
    pub(crate) fn failed(&self, error: impl Into<String>) -> Self {
        Self {
            loading: false,
            error: Some(error.into()),
            ..self.clone()
        }
    }

    /// Same session with a replaced profile
    #[must_use]
    pub(crate) fn with_user(&self, user: User) -> Self {
        match &self.token {
            Some(token) => Self::authenticated(token.clone(), user),
            None => self.failed("Cannot attach a profile to a session without a token"),
        }
    }

    /// Same session with the error cleared
    #[must_use]
    pub(crate) fn without_error(&self) -> Self {
        Self {
            error: None,
            ..self.clone()
        }
    }

    /// Lifecycle state
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Bearer credential
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Current profile
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether an auth request is in flight
    #[must_use]
    pub const fn loading(&self) -> bool {
        self.loading
    }

    /// Last auth failure message
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Credential and profile both present
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::unauthenticated()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user.as_ref().map(|user| &user.id))
            .field("loading", &self.loading)
            .field("error", &self.error)
            .finish()
    }
}
