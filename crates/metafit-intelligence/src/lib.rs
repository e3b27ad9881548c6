// ABOUTME: Weight progress, BMI, and recipe filtering calculators for the Metafit client
// ABOUTME: Pure, deterministic functions with no I/O, recomputed whenever their inputs change
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

#![deny(unsafe_code)]

//! # Metafit Intelligence
//!
//! Calculators that turn raw profile and history data into display values.
//! Every function here is pure: same input, same output, no caching.

/// Goal completion percentage and weight delta from a weight history
pub mod progress;

/// Body-mass index and its category buckets
pub mod bmi;

/// Recipe search and category filtering
pub mod recipes;

pub use bmi::{bmi, BmiCategory};
pub use progress::{
    compute_progress, describe_delta, history_with_changes, weight_delta, GoalDirection,
    HistoryEntry, ProgressResult, WeightDelta,
};
pub use recipes::{filter_recipes, RecipeFilter};
