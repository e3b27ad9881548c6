// ABOUTME: Weight history retrieval, progress reports, and recording new observations
// ABOUTME: Feeds backend weight data into the pure progress and BMI calculators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

use crate::api::MetafitApi;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use metafit_core::constants::limits;
use metafit_core::errors::validation::{ensure_in_range, Field};
use metafit_core::models::{NewWeightRecord, User, WeightRecord};
use metafit_intelligence::{
    bmi, history_with_changes, BmiCategory, GoalDirection, HistoryEntry, ProgressResult,
    WeightDelta,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Everything the progress screen shows, derived on demand and never cached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressReport {
    /// Goal completion in `[0, 100]`
    pub percent: f64,
    /// Change since the first observation
    pub delta: WeightDelta,
    /// Text form of `delta`
    pub description: String,
    /// Goal weight from the profile
    pub target_weight: f64,
    /// Earliest observed weight, profile weight when there is no history
    pub initial_weight: f64,
    /// Latest observed weight, profile weight when there is no history
    pub current_weight: f64,
    /// Kilograms still to go (positive to lose, negative to gain)
    pub remaining_kg: f64,
    /// Which way the goal points
    pub direction: GoalDirection,
    /// Body-mass index at the current weight
    pub bmi: Option<f64>,
    /// Bucket of `bmi`
    pub bmi_category: Option<BmiCategory>,
    /// Number of observations used
    pub observations: usize,
}

impl ProgressReport {
    /// Build a report from a weight history and the owner's profile
    #[must_use]
    pub fn build(records: &[WeightRecord], user: &User) -> Self {
        let result = ProgressResult::compute(records, user.target_weight);

        let mut chronological = records.to_vec();
        chronological.sort_by_key(|record| record.date);
        let initial_weight = chronological.first().map_or(user.weight, |record| record.weight);
        let current_weight = chronological.last().map_or(user.weight, |record| record.weight);

        let bmi = bmi(current_weight, user.height);
        Self {
            percent: result.percent,
            description: result.description(),
            delta: result.delta,
            target_weight: user.target_weight,
            initial_weight,
            current_weight,
            remaining_kg: current_weight - user.target_weight,
            direction: GoalDirection::from_weights(initial_weight, user.target_weight),
            bmi,
            bmi_category: bmi.map(BmiCategory::from_bmi),
            observations: records.len(),
        }
    }
}

/// Weight history operations against the backend
pub struct ProgressService {
    api: Arc<dyn MetafitApi>,
}

impl ProgressService {
    /// Create a service over an API client
    #[must_use]
    pub const fn new(api: Arc<dyn MetafitApi>) -> Self {
        Self { api }
    }

    /// Weight history as used by the dashboard (`GET /plans/weight`)
    ///
    /// # Errors
    ///
    /// Transport, backend, or session failures from the API.
    pub async fn history(&self) -> AppResult<Vec<WeightRecord>> {
        self.api.weight_history().await
    }

    /// Weight progress log (`GET /progress`)
    ///
    /// # Errors
    ///
    /// Transport, backend, or session failures from the API.
    pub async fn progress_log(&self) -> AppResult<Vec<WeightRecord>> {
        self.api.list_progress().await
    }

    /// Newest-first listing with the change from each previous observation
    ///
    /// # Errors
    ///
    /// Same as [`Self::history`].
    pub async fn history_listing(&self) -> AppResult<Vec<HistoryEntry>> {
        let records = self.history().await?;
        Ok(history_with_changes(&records))
    }

    /// Progress report for `user`
    ///
    /// Uses the backend history, falling back to the records embedded in the
    /// profile when the backend has none.
    ///
    /// # Errors
    ///
    /// Same as [`Self::history`].
    pub async fn report(&self, user: &User) -> AppResult<ProgressReport> {
        let mut records = self.history().await?;
        if records.is_empty() && !user.weight_records.is_empty() {
            debug!(
                count = user.weight_records.len(),
                "Using weight records embedded in the profile"
            );
            records.clone_from(&user.weight_records);
        }
        Ok(ProgressReport::build(&records, user))
    }

    /// Record a weight observation (`POST /progress`)
    ///
    /// # Errors
    ///
    /// `ValidationFailed` before any request when the weight is outside
    /// 30..=300 kg, otherwise API failures.
    pub async fn record_weight(&self, weight: f64, at: DateTime<Utc>) -> AppResult<WeightRecord> {
        ensure_in_range(Field::Weight, weight, limits::WEIGHT_KG).map_err(AppError::from)?;
        self.api
            .record_progress(&NewWeightRecord { date: at, weight })
            .await
    }
}
