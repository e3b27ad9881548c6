// ABOUTME: Metafit backend API abstraction and its reqwest implementation
// ABOUTME: The session manager and services talk to the backend only through MetafitApi
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

//! Backend API
//!
//! [`MetafitApi`] is the seam between client logic and the network. The
//! session manager installs the default credential with
//! [`MetafitApi::set_credential`]; every authenticated call afterwards carries
//! it. [`HttpApiClient`] is the production implementation.

/// reqwest-backed implementation
pub mod client;

pub use client::HttpApiClient;

use crate::errors::AppResult;
use async_trait::async_trait;
use metafit_core::models::{
    AuthResponse, DailyPlan, Exercise, LoginRequest, Meal, NewWeightRecord, RegisterRequest, User,
    UserPatch, WeightRecord,
};

/// Operations offered by the Metafit backend
///
/// Error mapping shared by every implementation:
/// - 401 on `login`/`register` is `InvalidCredentials`
/// - 401 on an authenticated call is `SessionExpired`
/// - any other non-2xx is `BackendError` carrying the backend message
/// - no response at all (refused, DNS, timeout) is `NetworkError`
#[async_trait]
pub trait MetafitApi: Send + Sync {
    /// Install or remove the default request credential
    async fn set_credential(&self, token: Option<String>);

    /// Credential currently attached to requests
    async fn credential(&self) -> Option<String>;

    /// `POST /auth/login`
    async fn login(&self, request: &LoginRequest) -> AppResult<AuthResponse>;

    /// `POST /auth/register`
    async fn register(&self, request: &RegisterRequest) -> AppResult<AuthResponse>;

    /// `GET /auth/user`
    async fn fetch_user(&self) -> AppResult<User>;

    /// `PUT /auth/user`
    async fn update_user(&self, patch: &UserPatch) -> AppResult<User>;

    /// `GET /plans`
    async fn list_plans(&self) -> AppResult<Vec<DailyPlan>>;

    /// `GET /plans/me`; the backend answers with one plan or a list
    async fn my_plans(&self) -> AppResult<Vec<DailyPlan>>;

    /// `POST /plans`
    async fn create_plan(&self, plan: &DailyPlan) -> AppResult<DailyPlan>;

    /// `POST /plans/generate`
    async fn generate_plan(&self) -> AppResult<DailyPlan>;

    /// `GET /meals`
    async fn list_meals(&self) -> AppResult<Vec<Meal>>;

    /// `GET /exercises`
    async fn list_exercises(&self) -> AppResult<Vec<Exercise>>;

    /// `GET /exercises/generate`
    async fn generate_exercises(&self) -> AppResult<Vec<Exercise>>;

    /// `GET /plans/weight`
    async fn weight_history(&self) -> AppResult<Vec<WeightRecord>>;

    /// `GET /progress`
    async fn list_progress(&self) -> AppResult<Vec<WeightRecord>>;

    /// `POST /progress`
    async fn record_progress(&self, record: &NewWeightRecord) -> AppResult<WeightRecord>;
}
