// ABOUTME: Authentication request and response payloads
// ABOUTME: Login, registration, and the token-bearing response both endpoints return
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

use super::user::User;
use crate::constants::limits;
use crate::errors::validation::{ensure_in_range, Field, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of `POST /auth/login`
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Body of `POST /auth/register`
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Full name
    pub full_name: String,
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
    /// Age in years
    pub age: u32,
    /// Weight in kilograms
    pub weight: f64,
    /// Height in centimeters
    pub height: f64,
    /// Goal weight in kilograms
    pub target_weight: f64,
}

impl RegisterRequest {
    /// Checks applied before the request leaves the client
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] when the target weight is
    /// outside 30..=300 kg.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_in_range(
            Field::TargetWeight,
            self.target_weight,
            limits::TARGET_WEIGHT_KG,
        )
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("age", &self.age)
            .field("weight", &self.weight)
            .field("height", &self.height)
            .field("target_weight", &self.target_weight)
            .finish()
    }
}

/// Response of login and registration
#[derive(Clone, Deserialize)]
pub struct AuthResponse {
    /// Opaque bearer credential
    pub token: String,
    /// Profile summary; the full profile is always re-fetched
    #[serde(default)]
    pub user: Option<User>,
}

impl fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthResponse")
            .field("token", &"[REDACTED]")
            .field("user", &self.user.as_ref().map(|user| &user.id))
            .finish()
    }
}
