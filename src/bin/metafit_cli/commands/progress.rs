// ABOUTME: Weight progress commands for the metafit CLI
// ABOUTME: Shows the goal report with optional history and records new observations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

use super::Context;
use crate::helpers::display::{display_history, display_progress};
use chrono::{DateTime, NaiveTime, Utc};
use metafit_client::errors::{AppError, AppResult};
use metafit_client::forms::parse_weight_entry;
use metafit_client::models::weight::parse_calendar_date;
use metafit_client::services::ProgressService;

/// Show goal progress, optionally with the full history
pub async fn show(ctx: &Context, with_history: bool) -> AppResult<()> {
    let user = ctx.require_user().await?;
    let service = ProgressService::new(ctx.api());

    display_progress(&service.report(&user).await?);
    if with_history {
        display_history(&service.history_listing().await?);
    }
    Ok(())
}

fn observation_time(date: Option<&str>) -> AppResult<DateTime<Utc>> {
    let Some(raw) = date else {
        return Ok(Utc::now());
    };
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw.trim()) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    parse_calendar_date(raw)
        .map(|day| day.and_time(NaiveTime::MIN).and_utc())
        .ok_or_else(|| AppError::validation(format!("'{raw}' is not a valid date")))
}

/// Record a weight observation
pub async fn record(ctx: &Context, weight: &str, date: Option<&str>) -> AppResult<()> {
    let weight = parse_weight_entry(weight).map_err(AppError::from)?;
    let at = observation_time(date)?;
    ctx.require_user().await?;

    let record = ProgressService::new(ctx.api())
        .record_weight(weight, at)
        .await?;
    println!(
        "Recorded {:.1} kg on {}",
        record.weight,
        record.date.format("%Y-%m-%d")
    );
    Ok(())
}
