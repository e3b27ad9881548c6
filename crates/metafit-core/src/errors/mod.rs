// ABOUTME: Unified error handling for the Metafit client with standard error codes
// ABOUTME: AppError carries an ErrorCode, a user-facing message, the HTTP status, and a source chain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

//! # Unified Error Handling System
//!
//! Every fallible operation in the client returns [`AppResult`]. The
//! [`ErrorCode`] names the failure class callers branch on:
//!
//! - `ValidationFailed` is raised locally and never reaches the network
//! - `InvalidCredentials` is a 401 on an anonymous request (login)
//! - `SessionExpired` is a 401 on an authenticated request
//! - `NetworkError` / `BackendError` cover transport failures and any other non-2xx

/// Field-level validation errors raised before a request is issued
pub mod validation;

pub use validation::ValidationError;

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// Standard error codes used throughout the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client-side validation
    /// A form or patch field failed local validation
    ValidationFailed,

    // Authentication
    /// Backend rejected the email/password pair
    InvalidCredentials,
    /// Backend rejected the stored token on an authenticated request
    SessionExpired,
    /// Operation needs a session but none is active
    AuthRequired,

    // Transport and backend
    /// Request never produced a response (connect failure, timeout, DNS)
    NetworkError,
    /// Backend answered with a non-2xx status
    BackendError,
    /// Backend answered 2xx with a body that could not be decoded
    InvalidResponse,

    // Local resources
    /// Reading or writing the persisted token failed
    StorageError,
    /// Required configuration is missing
    ConfigMissing,
    /// Configuration value could not be parsed
    ConfigInvalid,

    /// Anything else
    InternalError,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "The provided input is invalid",
            Self::InvalidCredentials => "Invalid credentials",
            Self::SessionExpired => "The session has expired, please log in again",
            Self::AuthRequired => "You must be logged in to perform this action",
            Self::NetworkError => "The Metafit service could not be reached",
            Self::BackendError => "The Metafit service reported an error",
            Self::InvalidResponse => "The Metafit service returned an unexpected response",
            Self::StorageError => "Local session storage failed",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
        }
    }

    /// Whether this error means the stored credential is no longer usable
    #[must_use]
    pub const fn is_auth_rejection(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::SessionExpired)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Unified error type for the client
#[derive(Debug, thiserror::Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message, surfaced to the user verbatim
    pub message: String,
    /// HTTP status returned by the backend, when there was one
    pub http_status: Option<u16>,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            http_status: None,
            source: None,
        }
    }

    /// Attach the HTTP status the backend answered with
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Client-side validation failure
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    /// Login rejected by the backend
    #[must_use]
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidCredentials, message)
    }

    /// Stored token rejected by the backend
    #[must_use]
    pub fn session_expired() -> Self {
        Self::new(
            ErrorCode::SessionExpired,
            ErrorCode::SessionExpired.description(),
        )
    }

    /// No active session
    #[must_use]
    pub fn auth_required() -> Self {
        Self::new(ErrorCode::AuthRequired, ErrorCode::AuthRequired.description())
    }

    /// Transport failure
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NetworkError, message)
    }

    /// Backend answered with a non-2xx status
    #[must_use]
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BackendError, message).with_status(status)
    }

    /// Undecodable response body
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidResponse, message)
    }

    /// Token storage failure
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Missing configuration
    #[must_use]
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigMissing, message)
    }

    /// Unparseable configuration
    #[must_use]
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Whether this is a transport or backend failure
    #[must_use]
    pub const fn is_remote_failure(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::NetworkError | ErrorCode::BackendError | ErrorCode::InvalidResponse
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        Self::validation(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::invalid_response(format!("JSON parse error: {error}")).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Error body shapes the Metafit backend is known to return
///
/// The backend answers validation failures either with `{"message": ...}`,
/// `{"msg": ...}`, or an express-validator style `{"errors": [{"msg": ...}]}`.
#[derive(Debug, Default, Deserialize)]
pub struct BackendErrorBody {
    /// Primary message
    #[serde(default)]
    pub message: Option<String>,
    /// Alternate message key
    #[serde(default)]
    pub msg: Option<String>,
    /// Per-field validator messages
    #[serde(default)]
    pub errors: Vec<BackendFieldError>,
}

/// One entry of a validator error list
#[derive(Debug, Deserialize)]
pub struct BackendFieldError {
    /// Validator message
    #[serde(default)]
    pub msg: Option<String>,
    /// Alternate message key
    #[serde(default)]
    pub message: Option<String>,
}

impl BackendErrorBody {
    /// Parse a raw response body, returning the first usable message
    #[must_use]
    pub fn extract_message(body: &str) -> Option<String> {
        let parsed: Self = serde_json::from_str(body).ok()?;
        parsed
            .message
            .or(parsed.msg)
            .or_else(|| {
                parsed
                    .errors
                    .into_iter()
                    .find_map(|field| field.msg.or(field.message))
            })
            .filter(|message| !message.trim().is_empty())
    }
}
