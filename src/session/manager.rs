// ABOUTME: Session manager owning the auth token, current user, and their persistence
// ABOUTME: Login, registration, restore with backoff, logout, and validated profile updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

use super::{Session, SessionState};
use crate::api::MetafitApi;
use crate::config::RetryPolicy;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::logging::AppLogger;
use crate::storage::TokenStore;
use metafit_core::models::{AuthResponse, LoginRequest, RegisterRequest, User, UserPatch};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Owns the session and publishes a new snapshot after every change
///
/// Operations are meant to be awaited one at a time; concurrent calls are not
/// serialized and the last snapshot published wins.
pub struct SessionManager {
    api: Arc<dyn MetafitApi>,
    store: Arc<dyn TokenStore>,
    retry: RetryPolicy,
    state: watch::Sender<Session>,
}

/// Whether a restore failure is worth retrying
fn is_transient(error: &AppError) -> bool {
    match error.code {
        ErrorCode::NetworkError => true,
        ErrorCode::BackendError => error.http_status.is_some_and(|status| status >= 500),
        _ => false,
    }
}

impl SessionManager {
    /// Create a manager in the `Unauthenticated` state
    #[must_use]
    pub fn new(api: Arc<dyn MetafitApi>, store: Arc<dyn TokenStore>) -> Self {
        let (state, _) = watch::channel(Session::unauthenticated());
        Self {
            api,
            store,
            retry: RetryPolicy::default(),
            state,
        }
    }

    /// Override the restore backoff
    #[must_use]
    pub const fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Backend the manager authenticates against
    #[must_use]
    pub fn api(&self) -> Arc<dyn MetafitApi> {
        Arc::clone(&self.api)
    }

    /// Current snapshot
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Observe every snapshot published from now on
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Current bearer credential
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.state.borrow().token().map(str::to_owned)
    }

    /// Current profile
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    fn publish(&self, next: Session) {
        debug!(session.state = %next.state(), session.loading = next.loading(), "Session updated");
        self.state.send_replace(next);
    }

    /// Reset `error`
    pub fn clear_error(&self) {
        let next = self.snapshot().without_error();
        self.publish(next);
    }

    /// Log in with email and password
    ///
    /// On success the token is persisted, installed as the request
    /// credential, and the full profile is fetched.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` when the backend rejects the pair, otherwise
    /// `NetworkError`/`BackendError`. Any earlier session is ended and no
    /// token is left behind.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        let request = LoginRequest {
            email: email.trim().to_owned(),
            password: password.to_owned(),
        };
        let previous = self.snapshot();
        self.publish(previous.begin(SessionState::Authenticating));

        match self.api.login(&request).await {
            Ok(response) => self.establish("login", &request.email, response).await,
            Err(e) => {
                AppLogger::log_auth_event(None, "login", false, Some(&e.message));
                self.discard_credential().await;
                self.publish(Session::unauthenticated().failed(e.message.clone()));
                Err(e)
            }
        }
    }

    /// Create an account and log into it
    ///
    /// # Errors
    ///
    /// `ValidationFailed` before any request when the target weight is
    /// outside 30..=300 kg, leaving the current session untouched. Backend
    /// rejections are surfaced with the backend's own message and end any
    /// earlier session.
    pub async fn register(&self, request: &RegisterRequest) -> AppResult<User> {
        let previous = self.snapshot();
        if let Err(invalid) = request.validate() {
            let error = AppError::from(invalid);
            AppLogger::log_auth_event(None, "register", false, Some(&error.message));
            self.publish(previous.failed(error.message.clone()));
            return Err(error);
        }

        self.publish(previous.begin(SessionState::Authenticating));
        match self.api.register(request).await {
            Ok(response) => self.establish("register", &request.email, response).await,
            Err(e) => {
                AppLogger::log_auth_event(None, "register", false, Some(&e.message));
                self.discard_credential().await;
                self.publish(Session::unauthenticated().failed(e.message.clone()));
                Err(e)
            }
        }
    }

    /// Persist and install a fresh token, then load the profile behind it
    ///
    /// If any step fails the token is rolled back and the session ends
    /// unauthenticated.
    async fn establish(&self, event: &str, email: &str, response: AuthResponse) -> AppResult<User> {
        let token = response.token;

        if let Err(e) = self.store.save(&token).await {
            AppLogger::log_auth_event(None, event, false, Some(&e.message));
            self.publish(Session::unauthenticated().failed(e.message.clone()));
            return Err(e);
        }
        self.api.set_credential(Some(token.clone())).await;

        match self.api.fetch_user().await {
            Ok(user) => {
                AppLogger::log_auth_event(Some(&user.id), event, true, Some(email));
                self.publish(Session::authenticated(token, user.clone()));
                Ok(user)
            }
            Err(e) => {
                AppLogger::log_auth_event(None, event, false, Some(&e.message));
                self.discard_credential().await;
                self.publish(Session::unauthenticated().failed(e.message.clone()));
                Err(e)
            }
        }
    }

    /// Forget the persisted and installed credential; storage failures are
    /// logged, never returned
    async fn discard_credential(&self) {
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "Failed to remove persisted token");
        }
        self.api.set_credential(None).await;
    }

    /// Log out
    ///
    /// Clears the persisted token, the request credential, and the session.
    /// Never fails; internal errors are logged.
    pub async fn logout(&self) {
        let previous = self.snapshot();
        let user_id = previous.user().map(|user| user.id.clone());
        self.publish(Session {
            loading: false,
            ..previous.begin(SessionState::LoggingOut)
        });

        self.discard_credential().await;
        AppLogger::log_auth_event(user_id.as_deref(), "logout", true, None);
        self.publish(Session::unauthenticated());
    }

    /// Restore the session from the persisted token
    ///
    /// Returns `Ok(None)` when there is nothing to restore. A rejected token
    /// logs out. Transient failures are retried with exponential backoff;
    /// when retries run out the session goes `Offline`, keeping the token so
    /// a later call can recover.
    ///
    /// # Errors
    ///
    /// `SessionExpired` when the backend rejects the token, `StorageError`
    /// when the token file cannot be read, or the last transport/backend
    /// failure.
    pub async fn load_user(&self) -> AppResult<Option<User>> {
        let stored = match self.store.load().await {
            Ok(stored) => stored,
            Err(e) => {
                AppLogger::log_auth_event(None, "restore", false, Some(&e.message));
                self.publish(Session::unauthenticated().failed(e.message.clone()));
                return Err(e);
            }
        };
        let Some(token) = stored else {
            debug!("No persisted token; staying unauthenticated");
            self.publish(Session::unauthenticated());
            return Ok(None);
        };

        self.api.set_credential(Some(token.clone())).await;
        self.publish(Session::restoring(token.clone()));

        let mut attempt = 0;
        loop {
            match self.api.fetch_user().await {
                Ok(user) => {
                    AppLogger::log_auth_event(Some(&user.id), "restore", true, None);
                    self.publish(Session::authenticated(token, user.clone()));
                    return Ok(Some(user));
                }
                Err(e) if e.code.is_auth_rejection() => {
                    AppLogger::log_auth_event(None, "restore", false, Some(&e.message));
                    self.logout().await;
                    self.publish(Session::unauthenticated().failed(e.message.clone()));
                    return Err(e);
                }
                Err(e) if is_transient(&e) && attempt < self.retry.max_retries => {
                    attempt += 1;
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        attempt,
                        max_retries = self.retry.max_retries,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %e,
                        "Profile fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    AppLogger::log_auth_event(None, "restore", false, Some(&e.message));
                    self.publish(Session::offline(token, e.message.clone()));
                    return Err(e);
                }
            }
        }
    }

    /// Apply a partial profile update
    ///
    /// Present fields are validated (age 18..=30, weight and target weight
    /// 30..=300 kg) before the backend is contacted. A failure keeps the
    /// current session and profile.
    ///
    /// # Errors
    ///
    /// `AuthRequired` without a token, `ValidationFailed` for out-of-range
    /// fields, or the backend failure (including `SessionExpired`).
    pub async fn update_user(&self, patch: &UserPatch) -> AppResult<User> {
        let previous = self.snapshot();
        if previous.token().is_none() {
            let error = AppError::auth_required();
            self.publish(previous.failed(error.message.clone()));
            return Err(error);
        }
        if let Err(invalid) = patch.validate() {
            let error = AppError::from(invalid);
            self.publish(previous.failed(error.message.clone()));
            return Err(error);
        }
        if patch.is_empty() {
            if let Some(user) = previous.user() {
                return Ok(user.clone());
            }
        }

        self.publish(previous.begin(previous.state()));
        match self.api.update_user(patch).await {
            Ok(user) => {
                debug!(user.id = %user.id, "Profile updated");
                self.publish(previous.with_user(user.clone()));
                Ok(user)
            }
            Err(e) => {
                warn!(error.code = ?e.code, error = %e, "Profile update failed");
                self.publish(previous.failed(e.message.clone()));
                Err(e)
            }
        }
    }
}
