// ABOUTME: Persistence of the session token between process runs
// ABOUTME: TokenStore trait with a JSON file implementation and an in-memory one
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

//! Token storage
//!
//! Exactly one value is persisted: the bearer token, under the fixed key
//! `token`. The session manager is the only writer.

/// JSON file backed store
pub mod file;

pub use file::FileTokenStore;

use crate::errors::AppResult;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Persistent home of the session token
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read the persisted token, `None` when nothing is stored
    async fn load(&self) -> AppResult<Option<String>>;

    /// Persist a token, replacing any previous one
    async fn save(&self, token: &str) -> AppResult<()>;

    /// Remove the persisted token; removing nothing is not an error
    async fn clear(&self) -> AppResult<()>;
}

/// Process-local store, for tests and embedders that persist elsewhere
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a token
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> AppResult<Option<String>> {
        Ok(self.token.read().await.clone())
    }

    async fn save(&self, token: &str) -> AppResult<()> {
        *self.token.write().await = Some(token.to_owned());
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        *self.token.write().await = None;
        Ok(())
    }
}
