// ABOUTME: Meal, exercise, and daily plan models
// ABOUTME: Meal categories mirror the BMI buckets the backend uses to tag recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

use super::weight::parse_calendar_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recipe category, keyed on the body-mass bucket the meal is designed for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MealCategory {
    /// Normal weight
    #[serde(rename = "normal")]
    Normal,
    /// Overweight
    #[serde(rename = "sobrepeso")]
    Overweight,
    /// Obesity class I
    #[serde(rename = "obesidadI")]
    ObesityI,
    /// Obesity class II
    #[serde(rename = "obesidadII")]
    ObesityII,
    /// Obesity class III
    #[serde(rename = "obesidadIII")]
    ObesityIII,
    /// Any tag this client does not know about
    #[serde(other)]
    Other,
}

impl MealCategory {
    /// All categories a user can filter on
    pub const FILTERABLE: [Self; 5] = [
        Self::Normal,
        Self::Overweight,
        Self::ObesityI,
        Self::ObesityII,
        Self::ObesityIII,
    ];

    /// Wire value of the category
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Overweight => "sobrepeso",
            Self::ObesityI => "obesidadI",
            Self::ObesityII => "obesidadII",
            Self::ObesityIII => "obesidadIII",
            Self::Other => "other",
        }
    }

    /// Human label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::ObesityI => "Obesity I",
            Self::ObesityII => "Obesity II",
            Self::ObesityIII => "Obesity III",
            Self::Other => "Uncategorized",
        }
    }

    /// Parse a wire value or label, case-insensitively
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        let lowered = s.trim().to_lowercase();
        Self::FILTERABLE
            .into_iter()
            .find(|category| {
                category.as_str().to_lowercase() == lowered
                    || category.label().to_lowercase() == lowered
            })
            .unwrap_or(Self::Other)
    }
}

impl fmt::Display for MealCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Recipe from the meal catalog (`GET /meals`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    /// Backend identifier
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Recipe name
    pub name: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Picture URL
    #[serde(default)]
    pub image_url: String,
    /// Energy in kcal
    #[serde(default)]
    pub calories: f64,
    /// Protein in grams
    #[serde(default)]
    pub protein: f64,
    /// Carbohydrates in grams
    #[serde(default)]
    pub carbs: f64,
    /// Fat in grams
    #[serde(default)]
    pub fat: f64,
    /// Ingredient list
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Preparation steps
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Body-mass bucket the recipe targets
    #[serde(default = "default_category")]
    pub category: MealCategory,
}

const fn default_category() -> MealCategory {
    MealCategory::Other
}

/// Exercise from the catalog or a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Backend identifier
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Exercise name
    pub name: String,
    /// Duration in minutes
    #[serde(default)]
    pub duration: u32,
    /// Difficulty label as provided by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    /// Estimated energy expenditure in kcal
    #[serde(default)]
    pub calories_burned: f64,
    /// Free text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Demonstration video
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Exercise category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Condensed meal as embedded in a daily plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealSummary {
    /// Recipe name
    pub name: String,
    /// Energy in kcal
    #[serde(default)]
    pub calories: f64,
    /// Category tag
    #[serde(default)]
    pub category: Option<String>,
}

/// The three meals of a plan day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanMeals {
    /// Breakfast
    pub breakfast: MealSummary,
    /// Lunch
    pub lunch: MealSummary,
    /// Dinner
    pub dinner: MealSummary,
}

impl PlanMeals {
    /// Meals in serving order with their slot name
    #[must_use]
    pub fn in_order(&self) -> [(&'static str, &MealSummary); 3] {
        [
            ("Breakfast", &self.breakfast),
            ("Lunch", &self.lunch),
            ("Dinner", &self.dinner),
        ]
    }

    /// Sum of the three meals' energy in kcal
    #[must_use]
    pub fn total_calories(&self) -> f64 {
        self.breakfast.calories + self.lunch.calories + self.dinner.calories
    }
}

/// One day of meals and exercises
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
    /// Backend identifier
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Plan day, as sent by the backend
    pub date: String,
    /// Meals of the day
    pub meals: PlanMeals,
    /// Exercises of the day
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl DailyPlan {
    /// Calendar day of the plan, if the backend date is parseable
    #[must_use]
    pub fn day(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.date)
    }

    /// Total exercise time in minutes
    #[must_use]
    pub fn exercise_minutes(&self) -> u32 {
        self.exercises.iter().map(|exercise| exercise.duration).sum()
    }

    /// Net energy balance of the day (meals minus exercise) in kcal
    #[must_use]
    pub fn net_calories(&self) -> f64 {
        let burned: f64 = self
            .exercises
            .iter()
            .map(|exercise| exercise.calories_burned)
            .sum();
        self.meals.total_calories() - burned
    }
}
