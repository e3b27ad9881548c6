// ABOUTME: Dashboard command for the metafit CLI
// ABOUTME: Loads progress, today's plan, and catalog counts in one concurrent round
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

use super::Context;
use crate::helpers::display::display_dashboard;
use metafit_client::errors::AppResult;
use metafit_client::services::DashboardService;

pub async fn show(ctx: &Context) -> AppResult<()> {
    let user = ctx.require_user().await?;
    let dashboard = DashboardService::new(ctx.api()).load(&user).await?;
    display_dashboard(&dashboard);
    Ok(())
}
