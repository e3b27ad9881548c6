// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Endpoints, profile limits, storage keys, headers, and environment variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

//! Constants module
//!
//! Constants are grouped by domain rather than kept in a single flat list.

/// Backend REST endpoints, relative to the configured base URL
pub mod endpoints {
    /// Email/password login
    pub const AUTH_LOGIN: &str = "/auth/login";
    /// Account registration
    pub const AUTH_REGISTER: &str = "/auth/register";
    /// Current user profile (GET to read, PUT to patch)
    pub const AUTH_USER: &str = "/auth/user";
    /// All daily plans (GET) or create a plan (POST)
    pub const PLANS: &str = "/plans";
    /// The caller's own daily plan
    pub const PLANS_ME: &str = "/plans/me";
    /// Generate a new daily plan
    pub const PLANS_GENERATE: &str = "/plans/generate";
    /// Weight history used by the dashboard
    pub const PLANS_WEIGHT: &str = "/plans/weight";
    /// Meal catalog
    pub const MEALS: &str = "/meals";
    /// Exercise catalog
    pub const EXERCISES: &str = "/exercises";
    /// Exercise recommendations
    pub const EXERCISES_GENERATE: &str = "/exercises/generate";
    /// Weight progress log (GET to list, POST to record)
    pub const PROGRESS: &str = "/progress";
}

/// Accepted ranges for profile values, inclusive on both ends
pub mod limits {
    /// Age in years accepted on profile updates
    pub const AGE_YEARS: (f64, f64) = (18.0, 30.0);
    /// Body weight in kilograms
    pub const WEIGHT_KG: (f64, f64) = (30.0, 300.0);
    /// Target weight in kilograms
    pub const TARGET_WEIGHT_KG: (f64, f64) = (30.0, 300.0);
    /// Minimum password length on registration
    pub const MIN_PASSWORD_LENGTH: usize = 6;
}

/// HTTP header names
pub mod headers {
    /// Custom token header accepted by the backend
    pub const X_AUTH_TOKEN: &str = "x-auth-token";
    /// Request correlation header
    pub const X_REQUEST_ID: &str = "x-request-id";
}

/// Local persistence
pub mod storage {
    /// Key under which the bearer token is persisted
    pub const TOKEN_KEY: &str = "token";
    /// Application directory name under the platform data dir
    pub const APP_DIR: &str = "metafit";
    /// File holding the persisted session
    pub const SESSION_FILE: &str = "session.json";
}

/// Environment variable names read by the client configuration
pub mod env_config {
    /// Backend base URL
    pub const API_URL: &str = "METAFIT_API_URL";
    /// Backend base URL as exported by the mobile build
    pub const API_URL_FALLBACK: &str = "EXPO_PUBLIC_API_URL";
    /// Credential header scheme
    pub const AUTH_HEADER: &str = "METAFIT_AUTH_HEADER";
    /// Request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: &str = "METAFIT_HTTP_TIMEOUT_SECS";
    /// Connect timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: &str = "METAFIT_CONNECT_TIMEOUT_SECS";
    /// Token file override
    pub const TOKEN_PATH: &str = "METAFIT_TOKEN_PATH";
    /// Extra attempts when restoring a session hits a transient failure
    pub const LOAD_USER_RETRIES: &str = "METAFIT_LOAD_USER_RETRIES";
    /// Base delay of the restore backoff in milliseconds
    pub const RETRY_BASE_DELAY_MS: &str = "METAFIT_RETRY_BASE_DELAY_MS";
}

/// Defaults applied when configuration is absent
pub mod defaults {
    /// Request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: u64 = 30;
    /// Connect timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Extra restore attempts after the first one
    pub const LOAD_USER_RETRIES: u32 = 2;
    /// Base restore backoff delay in milliseconds
    pub const RETRY_BASE_DELAY_MS: u64 = 500;
}

/// Service names used in structured logging
pub mod service_names {
    /// Client library / CLI service name
    pub const METAFIT_CLIENT: &str = "metafit-client";
}
