// ABOUTME: Shared test utilities for integration tests
// ABOUTME: Scripted in-memory MetafitApi, fixture users, and quiet test logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `metafit_client`

use async_trait::async_trait;
use chrono::NaiveDate;
use metafit_client::api::MetafitApi;
use metafit_client::config::RetryPolicy;
use metafit_client::errors::{AppError, AppResult};
use metafit_client::models::{
    AuthResponse, DailyPlan, Exercise, LoginRequest, Meal, NewWeightRecord, RegisterRequest, User,
    UserPatch, WeightRecord,
};
use metafit_client::session::SessionManager;
use metafit_client::storage::{MemoryTokenStore, TokenStore};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

pub const TEST_TOKEN: &str = "tok-123";

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Ana: 90 kg aiming for 70 kg, 170 cm tall
pub fn test_user() -> User {
    User {
        id: "u-1".to_owned(),
        full_name: "Ana Pérez".to_owned(),
        email: "ana@example.com".to_owned(),
        age: 25,
        weight: 90.0,
        height: 170.0,
        target_weight: 70.0,
        created_at: None,
        updated_at: None,
        weight_records: Vec::new(),
    }
}

pub fn auth_ok(token: &str) -> AppResult<AuthResponse> {
    Ok(AuthResponse {
        token: token.to_owned(),
        user: None,
    })
}

pub fn fast_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        base_delay: Duration::from_millis(1),
    }
}

/// `MetafitApi` whose auth and profile responses are queued by the test
///
/// Every call is recorded by name. An exhausted queue answers with an
/// internal error so unexpected calls fail loudly.
#[derive(Default)]
pub struct ScriptedApi {
    credential: Mutex<Option<String>>,
    calls: Mutex<Vec<&'static str>>,
    pub login: Mutex<VecDeque<AppResult<AuthResponse>>>,
    pub register: Mutex<VecDeque<AppResult<AuthResponse>>>,
    pub fetch_user: Mutex<VecDeque<AppResult<User>>>,
    pub update_user: Mutex<VecDeque<AppResult<User>>>,
    pub weight_history: Mutex<Vec<WeightRecord>>,
    pub plans: Mutex<Vec<DailyPlan>>,
    pub meals: Mutex<Vec<Meal>>,
    pub exercises: Mutex<Vec<Exercise>>,
}

impl ScriptedApi {
    pub fn new() -> Arc<Self> {
        init_test_logging();
        Arc::new(Self::default())
    }

    pub fn push_login(&self, result: AppResult<AuthResponse>) {
        self.login.lock().unwrap().push_back(result);
    }

    pub fn push_register(&self, result: AppResult<AuthResponse>) {
        self.register.lock().unwrap().push_back(result);
    }

    pub fn push_fetch_user(&self, result: AppResult<User>) {
        self.fetch_user.lock().unwrap().push_back(result);
    }

    pub fn push_update_user(&self, result: AppResult<User>) {
        self.update_user.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == name).count()
    }

    pub fn installed_credential(&self) -> Option<String> {
        self.credential.lock().unwrap().clone()
    }

    fn record(&self, name: &'static str) {
        self.calls.lock().unwrap().push(name);
    }

    fn next<T>(&self, name: &'static str, queue: &Mutex<VecDeque<AppResult<T>>>) -> AppResult<T> {
        self.record(name);
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::internal(format!("unscripted call to {name}"))))
    }

    fn require_credential(&self) -> AppResult<()> {
        if self.installed_credential().is_some() {
            Ok(())
        } else {
            Err(AppError::auth_required())
        }
    }
}

#[async_trait]
impl MetafitApi for ScriptedApi {
    async fn set_credential(&self, token: Option<String>) {
        *self.credential.lock().unwrap() = token;
    }

    async fn credential(&self) -> Option<String> {
        self.installed_credential()
    }

    async fn login(&self, _request: &LoginRequest) -> AppResult<AuthResponse> {
        self.next("login", &self.login)
    }

    async fn register(&self, _request: &RegisterRequest) -> AppResult<AuthResponse> {
        self.next("register", &self.register)
    }

    async fn fetch_user(&self) -> AppResult<User> {
        self.require_credential()?;
        self.next("fetch_user", &self.fetch_user)
    }

    async fn update_user(&self, _patch: &UserPatch) -> AppResult<User> {
        self.require_credential()?;
        self.next("update_user", &self.update_user)
    }

    async fn list_plans(&self) -> AppResult<Vec<DailyPlan>> {
        self.record("list_plans");
        Ok(self.plans.lock().unwrap().clone())
    }

    async fn my_plans(&self) -> AppResult<Vec<DailyPlan>> {
        self.record("my_plans");
        Ok(self.plans.lock().unwrap().clone())
    }

    async fn create_plan(&self, plan: &DailyPlan) -> AppResult<DailyPlan> {
        self.record("create_plan");
        self.plans.lock().unwrap().push(plan.clone());
        Ok(plan.clone())
    }

    async fn generate_plan(&self) -> AppResult<DailyPlan> {
        self.record("generate_plan");
        self.plans
            .lock()
            .unwrap()
            .last()
            .cloned()
            .ok_or_else(|| AppError::backend(500, "No meals available"))
    }

    async fn list_meals(&self) -> AppResult<Vec<Meal>> {
        self.record("list_meals");
        Ok(self.meals.lock().unwrap().clone())
    }

    async fn list_exercises(&self) -> AppResult<Vec<Exercise>> {
        self.record("list_exercises");
        Ok(self.exercises.lock().unwrap().clone())
    }

    async fn generate_exercises(&self) -> AppResult<Vec<Exercise>> {
        self.record("generate_exercises");
        Ok(self.exercises.lock().unwrap().iter().take(3).cloned().collect())
    }

    async fn weight_history(&self) -> AppResult<Vec<WeightRecord>> {
        self.record("weight_history");
        Ok(self.weight_history.lock().unwrap().clone())
    }

    async fn list_progress(&self) -> AppResult<Vec<WeightRecord>> {
        self.record("list_progress");
        Ok(self.weight_history.lock().unwrap().clone())
    }

    async fn record_progress(&self, record: &NewWeightRecord) -> AppResult<WeightRecord> {
        self.record("record_progress");
        let stored = WeightRecord::new(record.date.date_naive(), record.weight);
        self.weight_history.lock().unwrap().push(stored);
        Ok(stored)
    }
}

/// Token store that keeps tokens in memory but refuses to clear them
#[derive(Default)]
pub struct StuckTokenStore {
    inner: MemoryTokenStore,
}

impl StuckTokenStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl TokenStore for StuckTokenStore {
    async fn load(&self) -> AppResult<Option<String>> {
        self.inner.load().await
    }

    async fn save(&self, token: &str) -> AppResult<()> {
        self.inner.save(token).await
    }

    async fn clear(&self) -> AppResult<()> {
        Err(AppError::storage("token file is read-only"))
    }
}

/// Session manager over a scripted API and an in-memory token store
pub fn session_with(
    api: &Arc<ScriptedApi>,
    store: &Arc<MemoryTokenStore>,
    retry: RetryPolicy,
) -> SessionManager {
    let api: Arc<dyn MetafitApi> = api.clone();
    let store: Arc<dyn TokenStore> = store.clone();
    SessionManager::new(api, store).with_retry_policy(retry)
}
