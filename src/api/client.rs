// ABOUTME: reqwest implementation of the Metafit backend API
// ABOUTME: Attaches the credential per the configured scheme and maps HTTP failures to AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

use super::MetafitApi;
use crate::config::ClientConfig;
use crate::errors::{AppError, AppResult, BackendErrorBody};
use crate::http_client;
use crate::logging::AppLogger;
use async_trait::async_trait;
use metafit_core::constants::{endpoints, headers};
use metafit_core::models::{
    AuthResponse, DailyPlan, Exercise, LoginRequest, Meal, NewWeightRecord, RegisterRequest, User,
    UserPatch, WeightRecord,
};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Whether a request needs the session credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    /// Login and registration
    Anonymous,
    /// Everything else
    Authenticated,
}

/// Some endpoints answer with either a single object or a list
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// Metafit backend client over HTTP
pub struct HttpApiClient {
    config: ClientConfig,
    http_client: Client,
    credential: RwLock<Option<String>>,
}

impl HttpApiClient {
    /// Create a client with its own connection pool sized by the configuration
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let http_client = http_client::client_for(&config);
        Self::with_http_client(config, http_client)
    }

    /// Create a client around an existing reqwest client
    #[must_use]
    pub fn with_http_client(config: ClientConfig, http_client: Client) -> Self {
        Self {
            config,
            http_client,
            credential: RwLock::new(None),
        }
    }

    /// Configuration this client was built with
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn request(&self, method: Method, path: &str, access: Access) -> AppResult<RequestBuilder> {
        let mut builder = self
            .http_client
            .request(method, self.config.endpoint(path));

        if access == Access::Authenticated {
            let credential = self.credential.read().await;
            let token = credential.as_deref().ok_or_else(AppError::auth_required)?;
            let scheme = self.config.auth_scheme;
            if scheme.sends_bearer() {
                builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
            }
            if scheme.sends_x_auth_token() {
                builder = builder.header(headers::X_AUTH_TOKEN, token);
            }
        }
        Ok(builder)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        method: &Method,
        path: &str,
        access: Access,
    ) -> AppResult<T> {
        let request_id = Uuid::new_v4().to_string();
        let started = Instant::now();

        let response = match builder
            .header(headers::X_REQUEST_ID, &request_id)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                AppLogger::log_api_request(method.as_str(), path, None, started.elapsed(), &request_id);
                let message = if e.is_timeout() {
                    format!("Request to {path} timed out")
                } else {
                    format!("Could not reach the Metafit service: {e}")
                };
                return Err(AppError::network(message).with_source(e));
            }
        };

        let status = response.status();
        AppLogger::log_api_request(
            method.as_str(),
            path,
            Some(status.as_u16()),
            started.elapsed(),
            &request_id,
        );

        let body = response.bytes().await.map_err(|e| {
            AppError::network(format!("Failed to read response from {path}: {e}")).with_source(e)
        })?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            return Err(status_error(status, &text, access));
        }

        serde_json::from_slice(&body).map_err(|e| {
            debug!(http.path = %path, error = %e, "Undecodable response body");
            AppError::invalid_response(format!("Unexpected response from {path}: {e}")).with_source(e)
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let builder = self.request(Method::GET, path, Access::Authenticated).await?;
        self.execute(builder, &Method::GET, path, Access::Authenticated)
            .await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B, access: Access) -> AppResult<T>
    where
        B: serde::Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(method.clone(), path, access).await?.json(body);
        self.execute(builder, &method, path, access).await
    }
}

/// Map a non-2xx status to the error taxonomy
fn status_error(status: StatusCode, body: &str, access: Access) -> AppError {
    let backend_message = BackendErrorBody::extract_message(body);
    let code = status.as_u16();

    if status == StatusCode::UNAUTHORIZED {
        return match access {
            Access::Anonymous => AppError::invalid_credentials(
                backend_message.unwrap_or_else(|| "Invalid email or password".to_owned()),
            )
            .with_status(code),
            Access::Authenticated => AppError::session_expired().with_status(code),
        };
    }

    AppError::backend(
        code,
        backend_message.unwrap_or_else(|| {
            format!(
                "Metafit service returned HTTP {code} {}",
                status.canonical_reason().unwrap_or("")
            )
            .trim_end()
            .to_owned()
        }),
    )
}

#[async_trait]
impl MetafitApi for HttpApiClient {
    async fn set_credential(&self, token: Option<String>) {
        *self.credential.write().await = token;
    }

    async fn credential(&self) -> Option<String> {
        self.credential.read().await.clone()
    }

    async fn login(&self, request: &LoginRequest) -> AppResult<AuthResponse> {
        self.send_json(Method::POST, endpoints::AUTH_LOGIN, request, Access::Anonymous)
            .await
    }

    async fn register(&self, request: &RegisterRequest) -> AppResult<AuthResponse> {
        self.send_json(
            Method::POST,
            endpoints::AUTH_REGISTER,
            request,
            Access::Anonymous,
        )
        .await
    }

    async fn fetch_user(&self) -> AppResult<User> {
        self.get(endpoints::AUTH_USER).await
    }

    async fn update_user(&self, patch: &UserPatch) -> AppResult<User> {
        self.send_json(Method::PUT, endpoints::AUTH_USER, patch, Access::Authenticated)
            .await
    }

    async fn list_plans(&self) -> AppResult<Vec<DailyPlan>> {
        self.get(endpoints::PLANS).await
    }

    async fn my_plans(&self) -> AppResult<Vec<DailyPlan>> {
        let plans: OneOrMany<DailyPlan> = self.get(endpoints::PLANS_ME).await?;
        Ok(plans.into())
    }

    async fn create_plan(&self, plan: &DailyPlan) -> AppResult<DailyPlan> {
        self.send_json(Method::POST, endpoints::PLANS, plan, Access::Authenticated)
            .await
    }

    async fn generate_plan(&self) -> AppResult<DailyPlan> {
        self.send_json(
            Method::POST,
            endpoints::PLANS_GENERATE,
            &serde_json::json!({}),
            Access::Authenticated,
        )
        .await
    }

    async fn list_meals(&self) -> AppResult<Vec<Meal>> {
        self.get(endpoints::MEALS).await
    }

    async fn list_exercises(&self) -> AppResult<Vec<Exercise>> {
        self.get(endpoints::EXERCISES).await
    }

    async fn generate_exercises(&self) -> AppResult<Vec<Exercise>> {
        let exercises: OneOrMany<Exercise> = self.get(endpoints::EXERCISES_GENERATE).await?;
        Ok(exercises.into())
    }

    async fn weight_history(&self) -> AppResult<Vec<WeightRecord>> {
        self.get(endpoints::PLANS_WEIGHT).await
    }

    async fn list_progress(&self) -> AppResult<Vec<WeightRecord>> {
        self.get(endpoints::PROGRESS).await
    }

    async fn record_progress(&self, record: &NewWeightRecord) -> AppResult<WeightRecord> {
        self.send_json(Method::POST, endpoints::PROGRESS, record, Access::Authenticated)
            .await
    }
}
