// ABOUTME: Body-mass index calculation and WHO category buckets
// ABOUTME: Display-only values derived from the profile weight and height
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

use metafit_core::models::MealCategory;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Centimeters per meter
const CM_PER_M: f64 = 100.0;

/// Body-mass index from weight in kilograms and height in centimeters
///
/// Returns `None` when either input is missing, zero, negative, or not finite.
#[must_use]
pub fn bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if !(weight_kg.is_finite() && height_cm.is_finite()) || weight_kg <= 0.0 || height_cm <= 0.0 {
        return None;
    }
    let height_m = height_cm / CM_PER_M;
    Some(weight_kg / (height_m * height_m))
}

/// WHO body-mass index buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    /// Below 18.5
    Underweight,
    /// 18.5 to below 25
    Normal,
    /// 25 to below 30
    Overweight,
    /// 30 to below 35
    ObesityI,
    /// 35 to below 40
    ObesityII,
    /// 40 and above
    ObesityIII,
}

impl BmiCategory {
    /// Bucket a body-mass index value
    #[must_use]
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else if bmi < 35.0 {
            Self::ObesityI
        } else if bmi < 40.0 {
            Self::ObesityII
        } else {
            Self::ObesityIII
        }
    }

    /// Human label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::ObesityI => "Obesity I",
            Self::ObesityII => "Obesity II",
            Self::ObesityIII => "Obesity III",
        }
    }

    /// Recipe category designed for this bucket
    ///
    /// There is no dedicated underweight recipe line; those users get the
    /// normal-weight recipes.
    #[must_use]
    pub const fn meal_category(&self) -> MealCategory {
        match self {
            Self::Underweight | Self::Normal => MealCategory::Normal,
            Self::Overweight => MealCategory::Overweight,
            Self::ObesityI => MealCategory::ObesityI,
            Self::ObesityII => MealCategory::ObesityII,
            Self::ObesityIII => MealCategory::ObesityIII,
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
