// ABOUTME: Client-side validation for the login, registration, profile, and weight forms
// ABOUTME: Turns raw text input into typed requests, rejecting bad input before any network call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

//! Form validation
//!
//! Forms hold raw text exactly as typed. `validate` either produces the typed
//! request or the first [`ValidationError`] found, checked in the order the
//! fields appear on screen.

use crate::constants::limits;
use crate::errors::validation::{Field, ValidationError};
use crate::models::{LoginRequest, RegisterRequest, UserPatch};
use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;

/// Address shape accepted by the backend's signup form
const EMAIL_PATTERN: &str = r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$";

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).ok()).as_ref()
}

/// Whether `email` looks like an address the backend will accept
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email_regex().map_or_else(|| email.contains('@'), |regex| regex.is_match(email))
}

fn required(field: Field, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required { field })
    } else {
        Ok(())
    }
}

fn parse_number<T: FromStr>(field: Field, raw: &str) -> Result<T, ValidationError> {
    raw.trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| ValidationError::NotANumber { field })
}

fn parse_measure(field: Field, raw: &str) -> Result<f64, ValidationError> {
    let value: f64 = parse_number(field, raw)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotANumber { field })
    }
}

/// Raw login form input
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    /// Email as typed
    pub email: String,
    /// Password as typed
    pub password: String,
}

impl LoginForm {
    /// Validate and build the login request
    ///
    /// # Errors
    ///
    /// Missing credentials or a malformed email.
    pub fn validate(&self) -> Result<LoginRequest, ValidationError> {
        required(Field::Email, &self.email)?;
        required(Field::Password, &self.password)?;
        let email = self.email.trim();
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(LoginRequest {
            email: email.to_owned(),
            password: self.password.clone(),
        })
    }
}

/// Raw registration form input
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    /// Full name
    pub full_name: String,
    /// Email
    pub email: String,
    /// Password
    pub password: String,
    /// Password confirmation
    pub password_confirm: String,
    /// Age in years
    pub age: String,
    /// Weight in kilograms
    pub weight: String,
    /// Height in centimeters
    pub height: String,
    /// Goal weight in kilograms
    pub target_weight: String,
}

impl RegisterForm {
    /// Validate and build the registration request
    ///
    /// # Errors
    ///
    /// Missing fields, malformed email, short or mismatched passwords,
    /// non-numeric measures, or a target weight outside 30..=300 kg.
    pub fn validate(&self) -> Result<RegisterRequest, ValidationError> {
        required(Field::FullName, &self.full_name)?;
        required(Field::Email, &self.email)?;
        required(Field::Password, &self.password)?;
        required(Field::PasswordConfirm, &self.password_confirm)?;

        let email = self.email.trim();
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.password != self.password_confirm {
            return Err(ValidationError::PasswordMismatch);
        }
        if self.password.chars().count() < limits::MIN_PASSWORD_LENGTH {
            return Err(ValidationError::PasswordTooShort {
                min: limits::MIN_PASSWORD_LENGTH,
            });
        }

        required(Field::Age, &self.age)?;
        required(Field::Weight, &self.weight)?;
        required(Field::Height, &self.height)?;
        required(Field::TargetWeight, &self.target_weight)?;

        let request = RegisterRequest {
            full_name: self.full_name.trim().to_owned(),
            email: email.to_owned(),
            password: self.password.clone(),
            age: parse_number(Field::Age, &self.age)?,
            weight: parse_measure(Field::Weight, &self.weight)?,
            height: parse_measure(Field::Height, &self.height)?,
            target_weight: parse_measure(Field::TargetWeight, &self.target_weight)?,
        };
        request.validate()?;
        Ok(request)
    }
}

/// Raw profile editor input; every field is pre-filled from the current profile
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    /// Full name
    pub full_name: String,
    /// Age in years
    pub age: String,
    /// Weight in kilograms
    pub weight: String,
    /// Height in centimeters
    pub height: String,
    /// Goal weight in kilograms
    pub target_weight: String,
}

impl ProfileForm {
    /// Validate and build the profile patch
    ///
    /// # Errors
    ///
    /// Empty name, non-numeric measures, or values outside the profile limits.
    pub fn validate(&self) -> Result<UserPatch, ValidationError> {
        required(Field::FullName, &self.full_name)?;
        let patch = UserPatch {
            full_name: Some(self.full_name.trim().to_owned()),
            age: Some(parse_number(Field::Age, &self.age)?),
            weight: Some(parse_measure(Field::Weight, &self.weight)?),
            height: Some(parse_measure(Field::Height, &self.height)?),
            target_weight: Some(parse_measure(Field::TargetWeight, &self.target_weight)?),
        };
        patch.validate()?;
        Ok(patch)
    }
}

/// Parse a new weight observation typed by the user
///
/// # Errors
///
/// Returns an error unless the input is a finite number greater than zero.
pub fn parse_weight_entry(raw: &str) -> Result<f64, ValidationError> {
    let weight = parse_measure(Field::Weight, raw)?;
    if weight > 0.0 {
        Ok(weight)
    } else {
        Err(ValidationError::OutOfRange {
            field: Field::Weight,
            value: weight,
            min: 0.0,
            max: f64::MAX,
        })
    }
}
