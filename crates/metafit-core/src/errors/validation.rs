// ABOUTME: Field-level validation errors for forms and profile patches
// ABOUTME: Raised client-side before any request reaches the backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

use std::fmt;

/// Form field a validation error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Full name
    FullName,
    /// Email address
    Email,
    /// Password
    Password,
    /// Password confirmation
    PasswordConfirm,
    /// Age in years
    Age,
    /// Weight in kilograms
    Weight,
    /// Height in centimeters
    Height,
    /// Target weight in kilograms
    TargetWeight,
}

impl Field {
    /// Wire name of the field (camelCase, as the backend expects it)
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Password => "password",
            Self::PasswordConfirm => "passwordConfirm",
            Self::Age => "age",
            Self::Weight => "weight",
            Self::Height => "height",
            Self::TargetWeight => "targetWeight",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by client-side validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Required field left empty
    #[error("{field} is required")]
    Required {
        /// Offending field
        field: Field,
    },
    /// Email does not look like an address
    #[error("Please enter a valid email address")]
    InvalidEmail,
    /// Password shorter than the minimum
    #[error("Password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum accepted length
        min: usize,
    },
    /// Password and confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,
    /// Field expected a number
    #[error("{field} must be a valid number")]
    NotANumber {
        /// Offending field
        field: Field,
    },
    /// Numeric field outside its accepted range
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Offending field
        field: Field,
        /// Submitted value
        value: f64,
        /// Inclusive lower bound
        min: f64,
        /// Inclusive upper bound
        max: f64,
    },
}

impl ValidationError {
    /// Field the error refers to, when it is tied to one
    #[must_use]
    pub const fn field(&self) -> Option<Field> {
        match self {
            Self::Required { field }
            | Self::NotANumber { field }
            | Self::OutOfRange { field, .. } => Some(*field),
            Self::InvalidEmail => Some(Field::Email),
            Self::PasswordTooShort { .. } => Some(Field::Password),
            Self::PasswordMismatch => Some(Field::PasswordConfirm),
        }
    }
}

/// Check that `value` lies within the inclusive `range`
///
/// # Errors
///
/// Returns [`ValidationError::OutOfRange`] when the value is outside the range
/// or not finite.
pub fn ensure_in_range(field: Field, value: f64, (min, max): (f64, f64)) -> Result<(), ValidationError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
