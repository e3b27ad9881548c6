// ABOUTME: Integration tests for the session manager
// ABOUTME: Login, registration, restore with retry and offline fallback, profile updates, logout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{
    auth_ok, fast_retry, session_with, test_user, ScriptedApi, StuckTokenStore, TEST_TOKEN,
};
use metafit_client::config::RetryPolicy;
use metafit_client::errors::{AppError, ErrorCode};
use metafit_client::models::{RegisterRequest, UserPatch};
use metafit_client::models::User;
use metafit_client::session::{SessionManager, SessionState};
use metafit_client::storage::{MemoryTokenStore, TokenStore};
use std::sync::Arc;

fn registration(target_weight: f64) -> RegisterRequest {
    RegisterRequest {
        full_name: "Ana Pérez".to_owned(),
        email: "ana@example.com".to_owned(),
        password: "secreto1".to_owned(),
        age: 25,
        weight: 90.0,
        height: 170.0,
        target_weight,
    }
}

#[tokio::test]
async fn test_login_persists_token_and_loads_profile() {
    let api = ScriptedApi::new();
    api.push_login(auth_ok(TEST_TOKEN));
    api.push_fetch_user(Ok(test_user()));
    let store = Arc::new(MemoryTokenStore::new());
    let session = session_with(&api, &store, RetryPolicy::none());

    let user = session.login(" ana@example.com ", "secreto1").await.unwrap();

    assert_eq!(user.id, "u-1");
    let snapshot = session.snapshot();
    assert_eq!(snapshot.state(), SessionState::Authenticated);
    assert_eq!(snapshot.token(), Some(TEST_TOKEN));
    assert_eq!(snapshot.user(), Some(&user));
    assert!(!snapshot.loading());
    assert!(snapshot.error().is_none());
    assert_eq!(store.load().await.unwrap().as_deref(), Some(TEST_TOKEN));
    assert_eq!(api.installed_credential().as_deref(), Some(TEST_TOKEN));
    assert_eq!(api.calls(), vec!["login", "fetch_user"]);
}

#[tokio::test]
async fn test_login_with_wrong_credentials_leaves_no_token() {
    let api = ScriptedApi::new();
    api.push_login(Err(AppError::invalid_credentials("Credenciales inválidas")));
    let store = Arc::new(MemoryTokenStore::new());
    let session = session_with(&api, &store, RetryPolicy::none());

    let err = session.login("ana@example.com", "wrong").await.unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidCredentials);
    let snapshot = session.snapshot();
    assert_eq!(snapshot.state(), SessionState::Unauthenticated);
    assert!(snapshot.token().is_none());
    assert!(snapshot.user().is_none());
    assert!(!snapshot.loading());
    assert_eq!(snapshot.error(), Some("Credenciales inválidas"));
    assert_eq!(store.load().await.unwrap(), None);
    assert_eq!(api.count("fetch_user"), 0);
}

#[tokio::test]
async fn test_profile_failure_after_login_rolls_back_token() {
    let api = ScriptedApi::new();
    api.push_login(auth_ok(TEST_TOKEN));
    api.push_fetch_user(Err(AppError::backend(500, "Error del servidor")));
    let store = Arc::new(MemoryTokenStore::new());
    let session = session_with(&api, &store, fast_retry(3));

    let err = session.login("ana@example.com", "secreto1").await.unwrap_err();

    assert_eq!(err.code, ErrorCode::BackendError);
    assert!(!session.snapshot().is_authenticated());
    assert!(session.token().is_none());
    assert_eq!(store.load().await.unwrap(), None);
    assert!(api.installed_credential().is_none());
    assert_eq!(api.count("fetch_user"), 1, "login never retries");
}

#[tokio::test]
async fn test_register_rejects_target_weight_without_network() {
    let api = ScriptedApi::new();
    let store = Arc::new(MemoryTokenStore::new());
    let session = session_with(&api, &store, RetryPolicy::none());

    let err = session.register(&registration(25.0)).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::ValidationFailed);
    assert!(api.calls().is_empty());
    assert!(session.snapshot().error().is_some());
    assert!(!session.snapshot().loading());
}

#[tokio::test]
async fn test_register_surfaces_backend_message() {
    let api = ScriptedApi::new();
    api.push_register(Err(AppError::backend(400, "El email ya está registrado")));
    let store = Arc::new(MemoryTokenStore::new());
    let session = session_with(&api, &store, RetryPolicy::none());

    let err = session.register(&registration(70.0)).await.unwrap_err();

    assert_eq!(err.message, "El email ya está registrado");
    assert_eq!(session.snapshot().error(), Some("El email ya está registrado"));
    assert!(session.token().is_none());
}

#[tokio::test]
async fn test_register_logs_in() {
    let api = ScriptedApi::new();
    api.push_register(auth_ok(TEST_TOKEN));
    api.push_fetch_user(Ok(test_user()));
    let store = Arc::new(MemoryTokenStore::new());
    let session = session_with(&api, &store, RetryPolicy::none());

    session.register(&registration(70.0)).await.unwrap();

    assert!(session.snapshot().is_authenticated());
    assert_eq!(store.load().await.unwrap().as_deref(), Some(TEST_TOKEN));
}

#[tokio::test]
async fn test_load_user_without_token_is_a_no_op() {
    let api = ScriptedApi::new();
    let store = Arc::new(MemoryTokenStore::new());
    let session = session_with(&api, &store, RetryPolicy::none());

    assert!(session.load_user().await.unwrap().is_none());
    assert!(api.calls().is_empty());
    assert_eq!(session.snapshot().state(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn test_load_user_restores_session() {
    let api = ScriptedApi::new();
    api.push_fetch_user(Ok(test_user()));
    let store = Arc::new(MemoryTokenStore::with_token(TEST_TOKEN));
    let session = session_with(&api, &store, RetryPolicy::none());

    let user = session.load_user().await.unwrap().unwrap();

    assert_eq!(user.email, "ana@example.com");
    assert_eq!(session.snapshot().state(), SessionState::Authenticated);
    assert_eq!(session.token().as_deref(), Some(TEST_TOKEN));
}

#[tokio::test]
async fn test_load_user_with_expired_token_logs_out() {
    let api = ScriptedApi::new();
    api.push_fetch_user(Err(AppError::session_expired().with_status(401)));
    let store = Arc::new(MemoryTokenStore::with_token("expired"));
    let session = session_with(&api, &store, fast_retry(3));

    let err = session.load_user().await.unwrap_err();

    assert_eq!(err.code, ErrorCode::SessionExpired);
    assert_eq!(api.count("fetch_user"), 1, "auth rejections are not retried");
    assert_eq!(store.load().await.unwrap(), None);
    assert!(api.installed_credential().is_none());
    let snapshot = session.snapshot();
    assert_eq!(snapshot.state(), SessionState::Unauthenticated);
    assert!(snapshot.token().is_none());
    assert!(snapshot.error().is_some());
}

#[tokio::test]
async fn test_load_user_retries_transient_failures() {
    let api = ScriptedApi::new();
    api.push_fetch_user(Err(AppError::network("connection reset")));
    api.push_fetch_user(Err(AppError::backend(503, "Service Unavailable")));
    api.push_fetch_user(Ok(test_user()));
    let store = Arc::new(MemoryTokenStore::with_token(TEST_TOKEN));
    let session = session_with(&api, &store, fast_retry(2));

    let user = session.load_user().await.unwrap();

    assert!(user.is_some());
    assert_eq!(api.count("fetch_user"), 3);
    assert!(session.snapshot().is_authenticated());
}

#[tokio::test]
async fn test_load_user_goes_offline_and_recovers() {
    let api = ScriptedApi::new();
    for _ in 0..3 {
        api.push_fetch_user(Err(AppError::network("Could not reach the Metafit service")));
    }
    let store = Arc::new(MemoryTokenStore::with_token(TEST_TOKEN));
    let session = session_with(&api, &store, fast_retry(2));

    let err = session.load_user().await.unwrap_err();

    assert_eq!(err.code, ErrorCode::NetworkError);
    assert_eq!(api.count("fetch_user"), 3);
    let snapshot = session.snapshot();
    assert_eq!(snapshot.state(), SessionState::Offline);
    assert_eq!(snapshot.token(), Some(TEST_TOKEN));
    assert!(snapshot.user().is_none());
    assert!(snapshot.error().is_some());
    assert_eq!(store.load().await.unwrap().as_deref(), Some(TEST_TOKEN));

    api.push_fetch_user(Ok(test_user()));
    session.load_user().await.unwrap();
    assert_eq!(session.snapshot().state(), SessionState::Authenticated);
    assert!(session.snapshot().error().is_none());
}

#[tokio::test]
async fn test_load_user_does_not_retry_client_errors() {
    let api = ScriptedApi::new();
    api.push_fetch_user(Err(AppError::backend(404, "Usuario no encontrado")));
    let store = Arc::new(MemoryTokenStore::with_token(TEST_TOKEN));
    let session = session_with(&api, &store, fast_retry(2));

    session.load_user().await.unwrap_err();

    assert_eq!(api.count("fetch_user"), 1);
    assert_eq!(session.snapshot().state(), SessionState::Offline);
}

async fn logged_in(api: &Arc<ScriptedApi>, store: &Arc<MemoryTokenStore>) -> SessionManager {
    api.push_login(auth_ok(TEST_TOKEN));
    api.push_fetch_user(Ok(test_user()));
    let session = session_with(api, store, RetryPolicy::none());
    session.login("ana@example.com", "secreto1").await.unwrap();
    session
}

#[tokio::test]
async fn test_update_user_validates_before_request() {
    let api = ScriptedApi::new();
    let store = Arc::new(MemoryTokenStore::new());
    let session = logged_in(&api, &store).await;

    for patch in [
        UserPatch {
            age: Some(17),
            ..UserPatch::default()
        },
        UserPatch {
            age: Some(40),
            ..UserPatch::default()
        },
        UserPatch {
            weight: Some(25.0),
            ..UserPatch::default()
        },
        UserPatch {
            target_weight: Some(301.0),
            ..UserPatch::default()
        },
    ] {
        let err = session.update_user(&patch).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed, "{patch:?}");
    }

    assert_eq!(api.count("update_user"), 0);
    let snapshot = session.snapshot();
    assert!(snapshot.is_authenticated());
    assert_eq!(snapshot.user(), Some(&test_user()));
    assert!(snapshot.error().is_some());
}

#[tokio::test]
async fn test_update_user_replaces_profile() {
    let api = ScriptedApi::new();
    let store = Arc::new(MemoryTokenStore::new());
    let session = logged_in(&api, &store).await;
    let updated = User {
        weight: 85.0,
        ..test_user()
    };
    api.push_update_user(Ok(updated.clone()));

    let user = session
        .update_user(&UserPatch {
            weight: Some(85.0),
            ..UserPatch::default()
        })
        .await
        .unwrap();

    assert_eq!(user, updated);
    assert_eq!(session.current_user(), Some(updated));
    assert_eq!(session.token().as_deref(), Some(TEST_TOKEN));
}

#[tokio::test]
async fn test_update_user_rejection_keeps_session() {
    let api = ScriptedApi::new();
    let store = Arc::new(MemoryTokenStore::new());
    let session = logged_in(&api, &store).await;
    api.push_update_user(Err(AppError::session_expired().with_status(401)));

    let err = session
        .update_user(&UserPatch {
            full_name: Some("Ana María".to_owned()),
            ..UserPatch::default()
        })
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::SessionExpired);
    let snapshot = session.snapshot();
    assert!(snapshot.is_authenticated());
    assert_eq!(snapshot.token(), Some(TEST_TOKEN));
    assert_eq!(snapshot.user(), Some(&test_user()));
    assert!(snapshot.error().is_some());
    assert!(!snapshot.loading());
}

#[tokio::test]
async fn test_empty_update_sends_nothing() {
    let api = ScriptedApi::new();
    let store = Arc::new(MemoryTokenStore::new());
    let session = logged_in(&api, &store).await;

    let user = session.update_user(&UserPatch::default()).await.unwrap();

    assert_eq!(user, test_user());
    assert_eq!(api.count("update_user"), 0);
}

#[tokio::test]
async fn test_update_user_requires_login() {
    let api = ScriptedApi::new();
    let store = Arc::new(MemoryTokenStore::new());
    let session = session_with(&api, &store, RetryPolicy::none());

    let err = session
        .update_user(&UserPatch {
            age: Some(20),
            ..UserPatch::default()
        })
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::AuthRequired);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_logout_clears_everything() {
    let api = ScriptedApi::new();
    let store = Arc::new(MemoryTokenStore::new());
    let session = logged_in(&api, &store).await;

    session.logout().await;

    let snapshot = session.snapshot();
    assert_eq!(snapshot.state(), SessionState::Unauthenticated);
    assert!(snapshot.token().is_none());
    assert!(snapshot.user().is_none());
    assert!(snapshot.error().is_none());
    assert_eq!(store.load().await.unwrap(), None);
    assert!(api.installed_credential().is_none());

    // logging out twice is harmless
    session.logout().await;
    assert_eq!(session.snapshot().state(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn test_logout_survives_storage_failure() {
    let api = ScriptedApi::new();
    api.push_login(auth_ok(TEST_TOKEN));
    api.push_fetch_user(Ok(test_user()));
    let store = StuckTokenStore::new();
    let session = SessionManager::new(api.clone(), store.clone());
    session.login("ana@example.com", "secreto1").await.unwrap();

    session.logout().await;

    let snapshot = session.snapshot();
    assert_eq!(snapshot.state(), SessionState::Unauthenticated);
    assert!(snapshot.token().is_none());
    assert!(snapshot.user().is_none());
    assert!(snapshot.error().is_none());
    assert!(!snapshot.loading());
    assert!(api.installed_credential().is_none());
}

#[tokio::test]
async fn test_failed_login_ends_existing_session() {
    let api = ScriptedApi::new();
    let store = Arc::new(MemoryTokenStore::new());
    let session = logged_in(&api, &store).await;
    api.push_login(Err(AppError::invalid_credentials("Credenciales inválidas")));

    let err = session.login("otra@example.com", "wrong").await.unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidCredentials);
    let snapshot = session.snapshot();
    assert_eq!(snapshot.state(), SessionState::Unauthenticated);
    assert!(snapshot.token().is_none());
    assert!(snapshot.user().is_none());
    assert_eq!(snapshot.error(), Some("Credenciales inválidas"));
    assert_eq!(store.load().await.unwrap(), None);
    assert!(api.installed_credential().is_none());
}

#[tokio::test]
async fn test_failed_register_ends_existing_session() {
    let api = ScriptedApi::new();
    let store = Arc::new(MemoryTokenStore::new());
    let session = logged_in(&api, &store).await;
    api.push_register(Err(AppError::backend(400, "El email ya está registrado")));

    session.register(&registration(70.0)).await.unwrap_err();

    let snapshot = session.snapshot();
    assert_eq!(snapshot.state(), SessionState::Unauthenticated);
    assert!(snapshot.token().is_none());
    assert!(snapshot.user().is_none());
    assert_eq!(store.load().await.unwrap(), None);
    assert!(api.installed_credential().is_none());
}

#[tokio::test]
async fn test_invalid_registration_keeps_existing_session() {
    let api = ScriptedApi::new();
    let store = Arc::new(MemoryTokenStore::new());
    let session = logged_in(&api, &store).await;

    let err = session.register(&registration(25.0)).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::ValidationFailed);
    assert_eq!(api.count("register"), 0);
    assert!(session.snapshot().is_authenticated());
    assert_eq!(store.load().await.unwrap().as_deref(), Some(TEST_TOKEN));
}

#[tokio::test]
async fn test_subscribers_observe_transitions() {
    let api = ScriptedApi::new();
    api.push_login(Err(AppError::invalid_credentials("Invalid email or password")));
    let store = Arc::new(MemoryTokenStore::new());
    let session = session_with(&api, &store, RetryPolicy::none());
    let mut rx = session.subscribe();
    rx.mark_unchanged();

    session.login("ana@example.com", "nope").await.unwrap_err();

    assert!(rx.has_changed().unwrap());
    let seen = rx.borrow_and_update().clone();
    assert_eq!(seen.error(), Some("Invalid email or password"));

    session.clear_error();
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().error().is_none());
}
