// ABOUTME: Meal and exercise catalog access with recipe search
// ABOUTME: Recipe filtering runs locally over the fetched catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

use crate::api::MetafitApi;
use crate::errors::AppResult;
use metafit_core::models::{Exercise, Meal, User};
use metafit_intelligence::{bmi, filter_recipes, BmiCategory, RecipeFilter};
use std::sync::Arc;

/// Catalog operations against the backend
pub struct CatalogService {
    api: Arc<dyn MetafitApi>,
}

impl CatalogService {
    /// Create a service over an API client
    #[must_use]
    pub const fn new(api: Arc<dyn MetafitApi>) -> Self {
        Self { api }
    }

    /// Full meal catalog
    ///
    /// # Errors
    ///
    /// API failures.
    pub async fn meals(&self) -> AppResult<Vec<Meal>> {
        self.api.list_meals().await
    }

    /// Recipes matching a filter, in catalog order
    ///
    /// # Errors
    ///
    /// API failures.
    pub async fn recipes(&self, filter: &RecipeFilter) -> AppResult<Vec<Meal>> {
        let meals = self.meals().await?;
        Ok(filter_recipes(&meals, filter).into_iter().cloned().collect())
    }

    /// Exercise catalog
    ///
    /// # Errors
    ///
    /// API failures.
    pub async fn exercises(&self) -> AppResult<Vec<Exercise>> {
        self.api.list_exercises().await
    }

    /// Exercise recommendations for the caller
    ///
    /// # Errors
    ///
    /// API failures.
    pub async fn recommended_exercises(&self) -> AppResult<Vec<Exercise>> {
        self.api.generate_exercises().await
    }
}

/// Recipe filter preset to the category matching the user's BMI
#[must_use]
pub fn filter_for_user(user: &User) -> RecipeFilter {
    RecipeFilter {
        search: String::new(),
        category: bmi(user.weight, user.height)
            .map(|value| BmiCategory::from_bmi(value).meal_category()),
    }
}
