// ABOUTME: Catalog commands for the metafit CLI
// ABOUTME: Recipe search with category or BMI-based filtering, and exercise listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

use super::Context;
use crate::helpers::display::{display_exercises, display_recipes};
use metafit_client::errors::{AppError, AppResult};
use metafit_client::intelligence::RecipeFilter;
use metafit_client::models::MealCategory;
use metafit_client::services::catalog::{filter_for_user, CatalogService};

fn parse_category(raw: &str) -> AppResult<MealCategory> {
    match MealCategory::from_str_lossy(raw) {
        MealCategory::Other => Err(AppError::validation(format!(
            "Unknown recipe category '{raw}', expected one of: {}",
            MealCategory::FILTERABLE
                .iter()
                .map(MealCategory::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        ))),
        category => Ok(category),
    }
}

pub async fn recipes(
    ctx: &Context,
    search: String,
    category: Option<&str>,
    for_me: bool,
) -> AppResult<()> {
    let user = ctx.require_user().await?;
    let filter = if for_me {
        RecipeFilter {
            search,
            ..filter_for_user(&user)
        }
    } else {
        RecipeFilter {
            search,
            category: category.map(parse_category).transpose()?,
        }
    };

    let meals = CatalogService::new(ctx.api()).recipes(&filter).await?;
    display_recipes(&meals);
    Ok(())
}

pub async fn exercises(ctx: &Context, generate: bool) -> AppResult<()> {
    ctx.require_user().await?;
    let service = CatalogService::new(ctx.api());
    let exercises = if generate {
        service.recommended_exercises().await?
    } else {
        service.exercises().await?
    };
    display_exercises(&exercises);
    Ok(())
}
