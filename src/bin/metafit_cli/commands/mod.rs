// ABOUTME: Command modules for the metafit CLI and the context they share
// ABOUTME: Context wires the HTTP API, the file token store, and the session manager together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod plans;
pub mod profile;
pub mod progress;

use metafit_client::api::{HttpApiClient, MetafitApi};
use metafit_client::config::ClientConfig;
use metafit_client::errors::{AppError, AppResult, ErrorCode};
use metafit_client::models::User;
use metafit_client::session::SessionManager;
use metafit_client::storage::FileTokenStore;
use std::sync::Arc;

/// Everything a command needs
pub struct Context {
    pub session: SessionManager,
}

impl Context {
    pub fn new(config: ClientConfig) -> Self {
        let store = Arc::new(FileTokenStore::new(config.token_path.clone()));
        let retry = config.retry;
        let api: Arc<dyn MetafitApi> = Arc::new(HttpApiClient::new(config));
        Self {
            session: SessionManager::new(api, store).with_retry_policy(retry),
        }
    }

    pub fn api(&self) -> Arc<dyn MetafitApi> {
        self.session.api()
    }

    /// Restore the stored session, failing when nobody is logged in
    pub async fn require_user(&self) -> AppResult<User> {
        self.session.load_user().await?.ok_or_else(|| {
            AppError::new(
                ErrorCode::AuthRequired,
                "Not logged in, run `metafit login` first",
            )
        })
    }
}
