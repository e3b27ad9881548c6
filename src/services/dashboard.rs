// ABOUTME: Dashboard aggregation loading weight history, plans, meals, and exercises concurrently
// ABOUTME: Combines the results with the progress report and the plan for today
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

use super::plans::plan_for_day;
use super::progress::ProgressReport;
use crate::api::MetafitApi;
use crate::errors::AppResult;
use chrono::{NaiveDate, Utc};
use metafit_core::models::{DailyPlan, Exercise, Meal, User, WeightRecord};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Everything the home screen needs in one value
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Profile the dashboard was built for
    pub user: User,
    /// Weight progress
    pub progress: ProgressReport,
    /// Plan for the requested day, if one exists
    pub todays_plan: Option<DailyPlan>,
    /// All plans
    pub plans: Vec<DailyPlan>,
    /// Meal catalog
    pub meals: Vec<Meal>,
    /// Exercise catalog
    pub exercises: Vec<Exercise>,
    /// Raw weight history
    pub weight_history: Vec<WeightRecord>,
}

/// Loads the dashboard
pub struct DashboardService {
    api: Arc<dyn MetafitApi>,
}

impl DashboardService {
    /// Create a service over an API client
    #[must_use]
    pub const fn new(api: Arc<dyn MetafitApi>) -> Self {
        Self { api }
    }

    /// Load the dashboard for today (UTC)
    ///
    /// # Errors
    ///
    /// The first API failure among the concurrent fetches.
    pub async fn load(&self, user: &User) -> AppResult<Dashboard> {
        self.load_for_day(user, Utc::now().date_naive()).await
    }

    /// Load the dashboard for a given day
    ///
    /// The four fetches run concurrently; the first failure aborts the rest.
    ///
    /// # Errors
    ///
    /// The first API failure among the concurrent fetches.
    pub async fn load_for_day(&self, user: &User, day: NaiveDate) -> AppResult<Dashboard> {
        let started = Instant::now();
        let (weight_history, plans, meals, exercises) = tokio::try_join!(
            self.api.weight_history(),
            self.api.list_plans(),
            self.api.list_meals(),
            self.api.list_exercises(),
        )?;

        let records = if weight_history.is_empty() {
            user.weight_records.clone()
        } else {
            weight_history.clone()
        };
        let progress = ProgressReport::build(&records, user);
        let todays_plan = plan_for_day(&plans, day).cloned();

        info!(
            user.id = %user.id,
            weight_records = weight_history.len(),
            plans = plans.len(),
            meals = meals.len(),
            exercises = exercises.len(),
            duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Dashboard loaded"
        );

        Ok(Dashboard {
            user: user.clone(),
            progress,
            todays_plan,
            plans,
            meals,
            exercises,
            weight_history,
        })
    }
}
