// ABOUTME: Environment configuration for the Metafit client
// ABOUTME: Backend URL, credential header scheme, timeouts, token path, and restore backoff
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

//! Environment-based client configuration
//!
//! Configuration is read from environment variables only. The backend base URL
//! is required; everything else has a default.

use crate::errors::{AppError, AppResult};
use metafit_core::constants::{defaults, env_config, storage};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// How the session token is attached to authenticated requests
///
/// The backend has been seen accepting both `Authorization: Bearer` and a
/// custom `x-auth-token` header, so `Both` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScheme {
    /// `Authorization: Bearer <token>`
    Bearer,
    /// `x-auth-token: <token>`
    XAuthToken,
    /// Send both headers
    #[default]
    Both,
}

impl AuthScheme {
    /// Whether the `Authorization: Bearer` header is sent
    #[must_use]
    pub const fn sends_bearer(&self) -> bool {
        matches!(self, Self::Bearer | Self::Both)
    }

    /// Whether the `x-auth-token` header is sent
    #[must_use]
    pub const fn sends_x_auth_token(&self) -> bool {
        matches!(self, Self::XAuthToken | Self::Both)
    }
}

impl FromStr for AuthScheme {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bearer" | "authorization" => Ok(Self::Bearer),
            "x-auth-token" | "x_auth_token" | "token" => Ok(Self::XAuthToken),
            "both" => Ok(Self::Both),
            other => Err(AppError::config_invalid(format!(
                "{}: unknown auth header scheme '{other}' (expected bearer, x-auth-token, or both)",
                env_config::AUTH_HEADER
            ))),
        }
    }
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer => f.write_str("bearer"),
            Self::XAuthToken => f.write_str("x-auth-token"),
            Self::Both => f.write_str("both"),
        }
    }
}

/// Backoff applied when restoring a session hits a transient failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further retry
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// No retries at all
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    /// Delay before retry number `attempt` (1-based)
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2_u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: defaults::LOAD_USER_RETRIES,
            base_delay: Duration::from_millis(defaults::RETRY_BASE_DELAY_MS),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, without trailing slash
    pub api_url: Url,
    /// Credential header scheme
    pub auth_scheme: AuthScheme,
    /// Whole-request timeout
    pub request_timeout: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
    /// Where the session token is persisted
    pub token_path: PathBuf,
    /// Session restore backoff
    pub retry: RetryPolicy,
}

impl ClientConfig {
    /// Configuration with defaults for everything but the base URL
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when `api_url` is not an absolute http(s) URL.
    pub fn new(api_url: &str) -> AppResult<Self> {
        Ok(Self {
            api_url: parse_api_url(api_url)?,
            auth_scheme: AuthScheme::default(),
            request_timeout: Duration::from_secs(defaults::HTTP_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(defaults::CONNECT_TIMEOUT_SECS),
            token_path: default_token_path(),
            retry: RetryPolicy::default(),
        })
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when no base URL is set and `ConfigInvalid`
    /// when any variable fails to parse.
    pub fn from_env() -> AppResult<Self> {
        let api_url = env::var(env_config::API_URL)
            .or_else(|_| env::var(env_config::API_URL_FALLBACK))
            .map_err(|_| {
                AppError::config_missing(format!(
                    "{} must be set to the Metafit API base URL",
                    env_config::API_URL
                ))
            })?;
        Self::from_env_with_api_url(&api_url)
    }

    /// Load configuration from environment variables with an explicit base
    /// URL, for callers that take the URL from elsewhere (a CLI flag)
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when the URL or any variable fails to parse.
    pub fn from_env_with_api_url(api_url: &str) -> AppResult<Self> {
        let mut config = Self::new(api_url)?;

        if let Ok(scheme) = env::var(env_config::AUTH_HEADER) {
            config.auth_scheme = scheme.parse()?;
        }
        if let Some(secs) = env_u64(env_config::HTTP_TIMEOUT_SECS)? {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = env_u64(env_config::CONNECT_TIMEOUT_SECS)? {
            config.connect_timeout = Duration::from_secs(secs);
        }
        if let Ok(path) = env::var(env_config::TOKEN_PATH) {
            if !path.trim().is_empty() {
                config.token_path = PathBuf::from(path);
            }
        }
        if let Some(retries) = env_u64(env_config::LOAD_USER_RETRIES)? {
            config.retry.max_retries = u32::try_from(retries).map_err(|_| {
                AppError::config_invalid(format!(
                    "{} is too large: {retries}",
                    env_config::LOAD_USER_RETRIES
                ))
            })?;
        }
        if let Some(millis) = env_u64(env_config::RETRY_BASE_DELAY_MS)? {
            config.retry.base_delay = Duration::from_millis(millis);
        }

        if config.request_timeout.is_zero() {
            warn!("Request timeout of zero is not allowed; using the default");
            config.request_timeout = Duration::from_secs(defaults::HTTP_TIMEOUT_SECS);
        }

        debug!(
            api_url = %config.api_url,
            auth_scheme = %config.auth_scheme,
            token_path = %config.token_path.display(),
            "Client configuration loaded"
        );
        Ok(config)
    }

    /// Absolute URL of an endpoint path such as `/auth/login`
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn parse_api_url(raw: &str) -> AppResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| {
        AppError::config_invalid(format!("Invalid API URL '{raw}': {e}")).with_source(e)
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::config_invalid(format!(
            "API URL must use http or https, got '{other}'"
        ))),
    }
}

fn env_u64(name: &str) -> AppResult<Option<u64>> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map(Some).map_err(|_| {
            AppError::config_invalid(format!("{name} must be a non-negative integer, got '{raw}'"))
        }),
        Err(_) => Ok(None),
    }
}

/// `<platform data dir>/metafit/session.json`, or the working directory when
/// the platform has no data dir
#[must_use]
pub fn default_token_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(storage::APP_DIR)
        .join(storage::SESSION_FILE)
}
