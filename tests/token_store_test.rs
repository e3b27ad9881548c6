// ABOUTME: Integration tests for the file-backed token store
// ABOUTME: Missing files, nested directories, idempotent clears, and corrupt session files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use metafit_client::errors::ErrorCode;
use metafit_client::storage::{FileTokenStore, TokenStore};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> FileTokenStore {
    FileTokenStore::new(dir.path().join("nested").join("metafit").join("session.json"))
}

#[tokio::test]
async fn test_missing_file_means_no_token() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    assert_eq!(store.load().await.unwrap(), None);
}

#[tokio::test]
async fn test_save_creates_directories_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store.save("tok-123").await.unwrap();

    assert!(store.path().exists());
    assert_eq!(store.load().await.unwrap().as_deref(), Some("tok-123"));
    let raw = std::fs::read_to_string(store.path()).unwrap();
    let document: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(document["token"], "tok-123");
    assert!(!store.path().with_extension("json.tmp").exists());
}

#[tokio::test]
async fn test_save_replaces_previous_token() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store.save("first").await.unwrap();
    store.save("second").await.unwrap();

    assert_eq!(store.load().await.unwrap().as_deref(), Some("second"));
}

#[tokio::test]
async fn test_clear_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.save("tok-123").await.unwrap();

    store.clear().await.unwrap();
    store.clear().await.unwrap();

    assert_eq!(store.load().await.unwrap(), None);
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_empty_token_reads_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, r#"{"token": ""}"#).unwrap();

    assert_eq!(FileTokenStore::new(&path).load().await.unwrap(), None);
}

#[tokio::test]
async fn test_corrupt_file_is_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json").unwrap();

    let err = FileTokenStore::new(&path).load().await.unwrap_err();

    assert_eq!(err.code, ErrorCode::StorageError);
}
