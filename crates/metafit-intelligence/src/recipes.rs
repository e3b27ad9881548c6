// ABOUTME: Recipe search and category filter over the meal catalog
// ABOUTME: Case-insensitive match on recipe name or any ingredient
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

use metafit_core::models::{Meal, MealCategory};

/// Filter applied to the recipe catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    /// Free text matched against name and ingredients; empty matches all
    pub search: String,
    /// Restrict to one category; `None` means all categories
    pub category: Option<MealCategory>,
}

impl RecipeFilter {
    /// Whether a recipe passes the filter
    ///
    /// Recipes without a name or ingredient list are never shown.
    #[must_use]
    pub fn matches(&self, meal: &Meal) -> bool {
        if meal.name.trim().is_empty() || meal.ingredients.is_empty() {
            return false;
        }
        if self.category.is_some_and(|category| category != meal.category) {
            return false;
        }

        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || meal.name.to_lowercase().contains(&needle)
            || meal
                .ingredients
                .iter()
                .any(|ingredient| ingredient.to_lowercase().contains(&needle))
    }
}

/// Recipes passing the filter, in catalog order
#[must_use]
pub fn filter_recipes<'a>(meals: &'a [Meal], filter: &RecipeFilter) -> Vec<&'a Meal> {
    meals.iter().filter(|meal| filter.matches(meal)).collect()
}
