// ABOUTME: Daily plan retrieval, creation, and generation
// ABOUTME: Selects the plan for a given calendar day out of the backend's plan list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

use crate::api::MetafitApi;
use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, Utc};
use metafit_core::models::DailyPlan;
use std::sync::Arc;

/// Plan for `day`, if any; the last matching plan wins when the backend
/// returns several for the same day
#[must_use]
pub fn plan_for_day(plans: &[DailyPlan], day: NaiveDate) -> Option<&DailyPlan> {
    plans.iter().rev().find(|plan| plan.day() == Some(day))
}

/// Daily plan operations against the backend
pub struct PlanService {
    api: Arc<dyn MetafitApi>,
}

impl PlanService {
    /// Create a service over an API client
    #[must_use]
    pub const fn new(api: Arc<dyn MetafitApi>) -> Self {
        Self { api }
    }

    /// Every plan visible to the caller (`GET /plans`)
    ///
    /// # Errors
    ///
    /// API failures.
    pub async fn list(&self) -> AppResult<Vec<DailyPlan>> {
        self.api.list_plans().await
    }

    /// The caller's own plans (`GET /plans/me`)
    ///
    /// # Errors
    ///
    /// API failures.
    pub async fn mine(&self) -> AppResult<Vec<DailyPlan>> {
        self.api.my_plans().await
    }

    /// Plan for a given day out of the caller's own plans
    ///
    /// # Errors
    ///
    /// API failures.
    pub async fn for_day(&self, day: NaiveDate) -> AppResult<Option<DailyPlan>> {
        let plans = self.mine().await?;
        Ok(plan_for_day(&plans, day).cloned())
    }

    /// Plan for today (UTC)
    ///
    /// # Errors
    ///
    /// API failures.
    pub async fn today(&self) -> AppResult<Option<DailyPlan>> {
        self.for_day(Utc::now().date_naive()).await
    }

    /// Store a plan (`POST /plans`)
    ///
    /// # Errors
    ///
    /// `ValidationFailed` when the plan date is not a calendar date, otherwise
    /// API failures.
    pub async fn create(&self, plan: &DailyPlan) -> AppResult<DailyPlan> {
        if plan.day().is_none() {
            return Err(AppError::validation(format!(
                "Plan date '{}' is not a valid date",
                plan.date
            )));
        }
        self.api.create_plan(plan).await
    }

    /// Ask the backend to generate a plan (`POST /plans/generate`)
    ///
    /// # Errors
    ///
    /// API failures.
    pub async fn generate(&self) -> AppResult<DailyPlan> {
        self.api.generate_plan().await
    }
}
