// ABOUTME: Data models exchanged with the Metafit backend
// ABOUTME: User profile, weight history, meals, exercises, daily plans, and auth payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

//! Wire models. Field names follow the backend's camelCase JSON; identifiers
//! arrive as `_id` from the document store and are accepted as `id` too.

/// Login, registration, and token payloads
pub mod auth;
/// Meals, exercises, and daily plans
pub mod nutrition;
/// User profile and partial profile updates
pub mod user;
/// Weight observations
pub mod weight;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest};
pub use nutrition::{DailyPlan, Exercise, Meal, MealCategory, MealSummary, PlanMeals};
pub use user::{User, UserPatch};
pub use weight::{NewWeightRecord, WeightRecord};
