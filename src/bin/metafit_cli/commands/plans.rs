// ABOUTME: Daily plan commands for the metafit CLI
// ABOUTME: today, list, mine, generate, and create from a JSON file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

use super::Context;
use crate::helpers::display::{display_plan, display_plans};
use metafit_client::errors::{AppError, AppResult};
use metafit_client::models::DailyPlan;
use metafit_client::services::PlanService;
use std::path::Path;

async fn service(ctx: &Context) -> AppResult<PlanService> {
    ctx.require_user().await?;
    Ok(PlanService::new(ctx.api()))
}

pub async fn today(ctx: &Context) -> AppResult<()> {
    match service(ctx).await?.today().await? {
        Some(plan) => display_plan(&plan),
        None => println!("No plan for today. Try `metafit plan generate`."),
    }
    Ok(())
}

pub async fn list(ctx: &Context) -> AppResult<()> {
    display_plans(&service(ctx).await?.list().await?);
    Ok(())
}

pub async fn mine(ctx: &Context) -> AppResult<()> {
    display_plans(&service(ctx).await?.mine().await?);
    Ok(())
}

pub async fn generate(ctx: &Context) -> AppResult<()> {
    let plan = service(ctx).await?.generate().await?;
    display_plan(&plan);
    Ok(())
}

pub async fn create(ctx: &Context, file: &Path) -> AppResult<()> {
    let raw = tokio::fs::read_to_string(file).await.map_err(|e| {
        AppError::validation(format!("Cannot read plan file {}: {e}", file.display()))
            .with_source(e)
    })?;
    let plan: DailyPlan = serde_json::from_str(&raw).map_err(|e| {
        AppError::validation(format!("Plan file {} is not a valid plan: {e}", file.display()))
            .with_source(e)
    })?;

    let created = service(ctx).await?.create(&plan).await?;
    println!("Plan created\n");
    display_plan(&created);
    Ok(())
}
