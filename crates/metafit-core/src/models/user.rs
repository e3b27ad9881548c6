// ABOUTME: User profile model and partial profile updates
// ABOUTME: UserPatch validates the ranged fields before a PUT /auth/user is issued
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

use super::weight::WeightRecord;
use crate::constants::limits;
use crate::errors::validation::{ensure_in_range, Field, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile of the authenticated user as returned by `GET /auth/user`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend identifier
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Full name
    pub full_name: String,
    /// Email address
    pub email: String,
    /// Age in years
    pub age: u32,
    /// Current weight in kilograms
    pub weight: f64,
    /// Height in centimeters
    pub height: f64,
    /// Goal weight in kilograms
    pub target_weight: f64,
    /// Account creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last profile update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Weight history embedded in the profile by some backend versions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weight_records: Vec<WeightRecord>,
}

impl User {
    /// Display name, falling back to the email local part
    #[must_use]
    pub fn display_name(&self) -> &str {
        let name = self.full_name.trim();
        if name.is_empty() {
            self.email.split('@').next().unwrap_or(&self.email)
        } else {
            name
        }
    }
}

/// Partial profile update for `PUT /auth/user`
///
/// Only the fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    /// New full name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// New age in years
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// New weight in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// New height in centimeters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// New goal weight in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_weight: Option<f64>,
}

impl UserPatch {
    /// Whether the patch carries no change at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.age.is_none()
            && self.weight.is_none()
            && self.height.is_none()
            && self.target_weight.is_none()
    }

    /// Validate the ranged fields present in the patch
    ///
    /// # Errors
    ///
    /// Returns the first field that is out of range: age in 18..=30,
    /// weight and target weight in 30..=300 kg.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(age) = self.age {
            ensure_in_range(Field::Age, f64::from(age), limits::AGE_YEARS)?;
        }
        if let Some(weight) = self.weight {
            ensure_in_range(Field::Weight, weight, limits::WEIGHT_KG)?;
        }
        if let Some(target) = self.target_weight {
            ensure_in_range(Field::TargetWeight, target, limits::TARGET_WEIGHT_KG)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserializes_document_id() {
        let json = r#"{
            "_id": "65f0c2",
            "fullName": "Ana Coahuila",
            "email": "ana@example.com",
            "age": 24,
            "weight": 70.5,
            "height": 165,
            "targetWeight": 65,
            "createdAt": "2024-01-01T10:00:00.000Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "65f0c2");
        assert_eq!(user.full_name, "Ana Coahuila");
        assert!(user.created_at.is_some());
        assert!(user.updated_at.is_none());
        assert!(user.weight_records.is_empty());
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let patch = UserPatch {
            target_weight: Some(62.0),
            ..UserPatch::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "targetWeight": 62.0 }));
    }

    #[test]
    fn test_patch_validation_ranges() {
        let too_old = UserPatch {
            age: Some(31),
            ..UserPatch::default()
        };
        assert!(matches!(
            too_old.validate(),
            Err(ValidationError::OutOfRange { field: Field::Age, .. })
        ));

        let light = UserPatch {
            weight: Some(29.0),
            ..UserPatch::default()
        };
        assert!(light.validate().is_err());

        let fine = UserPatch {
            full_name: Some("Ana".to_owned()),
            age: Some(18),
            weight: Some(300.0),
            target_weight: Some(30.0),
            height: Some(150.0),
        };
        assert!(fine.validate().is_ok());
        assert!(UserPatch::default().is_empty());
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user = User {
            id: "1".to_owned(),
            full_name: "  ".to_owned(),
            email: "ana@example.com".to_owned(),
            age: 20,
            weight: 70.0,
            height: 165.0,
            target_weight: 65.0,
            created_at: None,
            updated_at: None,
            weight_records: Vec::new(),
        };
        assert_eq!(user.display_name(), "ana");
    }
}
