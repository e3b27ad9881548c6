// ABOUTME: Token store backed by a small JSON document on disk
// ABOUTME: Writes {"token": "..."} atomically via a temp file and rename
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

use super::TokenStore;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use async_trait::async_trait;
use metafit_core::constants::storage;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Token persisted as `{"token": "..."}` in a JSON file
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store at `path`; the parent directory is created on first save
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the session file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, action: &str, e: std::io::Error) -> AppError {
        AppLogger::log_storage_operation(action, false, Some(&e.to_string()));
        AppError::storage(format!(
            "Failed to {action} session file {}: {e}",
            self.path.display()
        ))
        .with_source(e)
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> AppResult<Option<String>> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.storage_error("read", e)),
        };

        let document: Value = serde_json::from_str(&raw).map_err(|e| {
            AppError::storage(format!(
                "Session file {} is not valid JSON: {e}",
                self.path.display()
            ))
            .with_source(e)
        })?;

        let token = document
            .get(storage::TOKEN_KEY)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_owned);
        AppLogger::log_storage_operation("load", true, None);
        Ok(token)
    }

    async fn save(&self, token: &str) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| self.storage_error("create directory for", e))?;
        }

        let mut document = Map::new();
        document.insert(storage::TOKEN_KEY.to_owned(), Value::String(token.to_owned()));
        let contents = serde_json::to_vec_pretty(&Value::Object(document))
            .map_err(|e| AppError::internal(format!("Failed to encode session: {e}")))?;

        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, contents)
            .await
            .map_err(|e| self.storage_error("write", e))?;
        fs::rename(&staging, &self.path)
            .await
            .map_err(|e| self.storage_error("replace", e))?;

        AppLogger::log_storage_operation("save", true, None);
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                AppLogger::log_storage_operation("clear", true, None);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.storage_error("remove", e)),
        }
    }
}
