// ABOUTME: Data services built on the backend API: progress, plans, catalog, and dashboard
// ABOUTME: Reusable by the CLI and by any embedding front end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

//! Data services
//!
//! Services never touch the session; they receive an API handle whose
//! credential the [`SessionManager`](crate::session::SessionManager) keeps
//! current. Their failures are returned to the caller and never invalidate
//! the session.

/// Meal and exercise catalog with recipe search
pub mod catalog;

/// Concurrent dashboard loading
pub mod dashboard;

/// Daily plans
pub mod plans;

/// Weight history and progress reports
pub mod progress;

pub use catalog::CatalogService;
pub use dashboard::{Dashboard, DashboardService};
pub use plans::PlanService;
pub use progress::{ProgressReport, ProgressService};
