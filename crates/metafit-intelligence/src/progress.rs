// ABOUTME: Weight goal progress calculator for loss and gain goals alike
// ABOUTME: Linear interpolation between the first and last observation, clamped to 0-100
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

//! Goal progress
//!
//! Progress is the share of the distance from the first observed weight to the
//! target that has been covered by the latest observation:
//!
//! ```text
//! loss goal (target < initial):  (initial - current) / (initial - target) * 100
//! gain goal (target > initial):  (current - initial) / (target - initial) * 100
//! ```
//!
//! Reaching or passing the target is 100, standing still or regressing is 0,
//! and a target equal to the starting weight is already complete.

use metafit_core::models::WeightRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Lower bound of the progress percentage
const MIN_PERCENT: f64 = 0.0;
/// Upper bound of the progress percentage
const MAX_PERCENT: f64 = 100.0;

/// Which way the user wants their weight to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalDirection {
    /// Target below the starting weight
    Lose,
    /// Target above the starting weight
    Gain,
    /// Target equal to the starting weight
    Maintain,
}

impl GoalDirection {
    /// Classify a goal from the starting and target weights
    #[must_use]
    pub fn from_weights(initial: f64, target: f64) -> Self {
        match target.partial_cmp(&initial) {
            Some(Ordering::Less) => Self::Lose,
            Some(Ordering::Greater) => Self::Gain,
            _ => Self::Maintain,
        }
    }
}

/// Stable chronological copy of the records; ties keep their input order
fn sorted_by_date(records: &[WeightRecord]) -> Vec<WeightRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|record| record.date);
    sorted
}

/// First and last weight of the chronologically sorted history
fn endpoints(records: &[WeightRecord]) -> Option<(f64, f64)> {
    let sorted = sorted_by_date(records);
    let initial = sorted.first()?.weight;
    let current = sorted.last()?.weight;
    Some((initial, current))
}

/// Raw percentage for a goal, before clamping
fn goal_percent(initial: f64, current: f64, target: f64) -> f64 {
    match GoalDirection::from_weights(initial, target) {
        GoalDirection::Lose => {
            if current <= target {
                MAX_PERCENT
            } else if current >= initial {
                MIN_PERCENT
            } else {
                (initial - current) / (initial - target) * MAX_PERCENT
            }
        }
        GoalDirection::Gain => {
            if current >= target {
                MAX_PERCENT
            } else if current <= initial {
                MIN_PERCENT
            } else {
                (current - initial) / (target - initial) * MAX_PERCENT
            }
        }
        GoalDirection::Maintain => MAX_PERCENT,
    }
}

/// Completion percentage of a weight goal, in `[0, 100]`
///
/// Records may arrive in any order; they are sorted by date (stable on ties)
/// and the first and last entries anchor the calculation. An empty history is
/// 0. Non-finite weights or targets also yield 0.
#[must_use]
pub fn compute_progress(records: &[WeightRecord], target_weight: f64) -> f64 {
    let Some((initial, current)) = endpoints(records) else {
        return MIN_PERCENT;
    };
    if !(initial.is_finite() && current.is_finite() && target_weight.is_finite()) {
        return MIN_PERCENT;
    }

    let percent = goal_percent(initial, current, target_weight);
    if percent.is_finite() {
        percent.clamp(MIN_PERCENT, MAX_PERCENT)
    } else {
        MIN_PERCENT
    }
}

/// Change between the first and the latest observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "kg", rename_all = "snake_case")]
pub enum WeightDelta {
    /// Fewer than two observations
    JustStarting,
    /// Weight went down by this many kilograms (positive, one decimal)
    Lost(f64),
    /// Weight went up by this many kilograms (positive, one decimal)
    Gained(f64),
    /// Same weight as the first observation, to one decimal
    NoChange,
}

impl fmt::Display for WeightDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JustStarting => f.write_str("Just getting started"),
            Self::Lost(kg) => write!(f, "You have lost {kg:.1} kg"),
            Self::Gained(kg) => write!(f, "You have gained {kg:.1} kg"),
            Self::NoChange => f.write_str("Same weight as at the start"),
        }
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Classify the change from the first to the latest observation
#[must_use]
pub fn weight_delta(records: &[WeightRecord]) -> WeightDelta {
    if records.len() < 2 {
        return WeightDelta::JustStarting;
    }
    let Some((initial, current)) = endpoints(records) else {
        return WeightDelta::JustStarting;
    };

    let difference = round_to_tenth(current - initial);
    if difference < 0.0 {
        WeightDelta::Lost(difference.abs())
    } else if difference > 0.0 {
        WeightDelta::Gained(difference)
    } else {
        WeightDelta::NoChange
    }
}

/// Human-readable description of the change since the first observation
#[must_use]
pub fn describe_delta(records: &[WeightRecord]) -> String {
    weight_delta(records).to_string()
}

/// Derived progress view: percentage plus weight delta. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressResult {
    /// Goal completion, clamped to `[0, 100]`
    pub percent: f64,
    /// Change since the first observation
    pub delta: WeightDelta,
}

impl ProgressResult {
    /// Compute both values from the same history
    #[must_use]
    pub fn compute(records: &[WeightRecord], target_weight: f64) -> Self {
        Self {
            percent: compute_progress(records, target_weight),
            delta: weight_delta(records),
        }
    }

    /// Textual description of the delta
    #[must_use]
    pub fn description(&self) -> String {
        self.delta.to_string()
    }
}

/// One line of a newest-first history listing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The observation
    pub record: WeightRecord,
    /// Signed change from the previous (older) observation, one decimal
    pub change_from_previous: Option<f64>,
}

/// History newest first, each entry annotated with its change from the one before
#[must_use]
pub fn history_with_changes(records: &[WeightRecord]) -> Vec<HistoryEntry> {
    let sorted = sorted_by_date(records);
    let mut entries: Vec<HistoryEntry> = sorted
        .iter()
        .enumerate()
        .map(|(index, record)| HistoryEntry {
            record: *record,
            change_from_previous: index
                .checked_sub(1)
                .and_then(|previous| sorted.get(previous))
                .map(|previous| round_to_tenth(record.weight - previous.weight)),
        })
        .collect();
    entries.reverse();
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(year: i32, month: u32, day: u32, weight: f64) -> WeightRecord {
        WeightRecord::new(
            NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
            weight,
        )
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_empty_history_is_zero() {
        assert_close(compute_progress(&[], 70.0), 0.0);
        assert_close(compute_progress(&[], f64::NAN), 0.0);
    }

    #[test]
    fn test_loss_goal_interpolates() {
        let records = [record(2024, 1, 1, 90.0), record(2024, 2, 1, 85.0)];
        assert_close(compute_progress(&records, 70.0), 25.0);
    }

    #[test]
    fn test_single_record_at_goal_is_complete() {
        assert_close(compute_progress(&[record(2024, 1, 1, 70.0)], 70.0), 100.0);
    }

    #[test]
    fn test_equal_goal_ignores_later_values() {
        let records = [record(2024, 1, 1, 70.0), record(2024, 3, 1, 95.0)];
        assert_close(compute_progress(&records, 70.0), 100.0);
    }

    #[test]
    fn test_loss_goal_edges() {
        let reached = [record(2024, 1, 1, 90.0), record(2024, 2, 1, 69.0)];
        assert_close(compute_progress(&reached, 70.0), 100.0);

        let regressed = [record(2024, 1, 1, 90.0), record(2024, 2, 1, 92.0)];
        assert_close(compute_progress(&regressed, 70.0), 0.0);

        let flat = [record(2024, 1, 1, 90.0), record(2024, 2, 1, 90.0)];
        assert_close(compute_progress(&flat, 70.0), 0.0);
    }

    #[test]
    fn test_gain_goal_is_symmetric() {
        let halfway = [record(2024, 1, 1, 50.0), record(2024, 2, 1, 55.0)];
        assert_close(compute_progress(&halfway, 60.0), 50.0);

        let reached = [record(2024, 1, 1, 50.0), record(2024, 2, 1, 61.0)];
        assert_close(compute_progress(&reached, 60.0), 100.0);

        let regressed = [record(2024, 1, 1, 50.0), record(2024, 2, 1, 48.0)];
        assert_close(compute_progress(&regressed, 60.0), 0.0);
    }

    #[test]
    fn test_out_of_order_input_is_sorted() {
        let records = [record(2024, 2, 1, 85.0), record(2024, 1, 1, 90.0)];
        assert_close(compute_progress(&records, 70.0), 25.0);
    }

    #[test]
    fn test_latest_date_tie_uses_last_in_input_order() {
        let records = [
            record(2024, 1, 1, 90.0),
            record(2024, 2, 1, 88.0),
            record(2024, 2, 1, 80.0),
        ];
        assert_close(compute_progress(&records, 70.0), 50.0);
    }

    #[test]
    fn test_loss_progress_is_monotone() {
        let mut previous = -1.0;
        for step in 0..=40 {
            let current = 90.0 - f64::from(step) * 0.5;
            let records = [record(2024, 1, 1, 90.0), record(2024, 6, 1, current)];
            let percent = compute_progress(&records, 70.0);
            assert!((0.0..=100.0).contains(&percent));
            assert!(percent >= previous, "{percent} < {previous} at {current}");
            previous = percent;
        }
        assert_close(previous, 100.0);
    }

    #[test]
    fn test_pathological_inputs_stay_bounded() {
        let records = [record(2024, 1, 1, f64::INFINITY), record(2024, 2, 1, 80.0)];
        assert_close(compute_progress(&records, 70.0), 0.0);

        let records = [record(2024, 1, 1, 70.000_000_001), record(2024, 2, 1, 70.0)];
        let percent = compute_progress(&records, 70.0);
        assert!((0.0..=100.0).contains(&percent));
    }

    #[test]
    fn test_goal_direction() {
        assert_eq!(GoalDirection::from_weights(90.0, 70.0), GoalDirection::Lose);
        assert_eq!(GoalDirection::from_weights(50.0, 60.0), GoalDirection::Gain);
        assert_eq!(GoalDirection::from_weights(70.0, 70.0), GoalDirection::Maintain);
    }

    #[test]
    fn test_describe_delta() {
        assert_eq!(describe_delta(&[]), "Just getting started");
        assert_eq!(
            describe_delta(&[record(2024, 1, 1, 80.0)]),
            "Just getting started"
        );
        assert_eq!(
            describe_delta(&[record(2024, 2, 1, 85.0), record(2024, 1, 1, 90.0)]),
            "You have lost 5.0 kg"
        );
        assert_eq!(
            describe_delta(&[record(2024, 1, 1, 60.0), record(2024, 2, 1, 61.25)]),
            "You have gained 1.3 kg"
        );
        assert_eq!(
            describe_delta(&[record(2024, 1, 1, 60.0), record(2024, 2, 1, 60.02)]),
            "Same weight as at the start"
        );
    }

    #[test]
    fn test_history_with_changes_newest_first() {
        let entries = history_with_changes(&[
            record(2024, 1, 1, 90.0),
            record(2024, 3, 1, 86.5),
            record(2024, 2, 1, 88.0),
        ]);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].record.weight.to_bits(), 86.5_f64.to_bits());
        assert_eq!(entries[0].change_from_previous, Some(-1.5));
        assert_eq!(entries[1].change_from_previous, Some(-2.0));
        assert_eq!(entries[2].change_from_previous, None);
    }

    #[test]
    fn test_progress_result_serialization() {
        let result = ProgressResult::compute(
            &[record(2024, 1, 1, 90.0), record(2024, 2, 1, 85.0)],
            70.0,
        );
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["percent"], 25.0);
        assert_eq!(json["delta"]["kind"], "lost");
        assert_eq!(json["delta"]["kg"], 5.0);
        assert_eq!(result.description(), "You have lost 5.0 kg");
    }
}
