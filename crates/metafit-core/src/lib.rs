// ABOUTME: Core types and constants for the Metafit fitness client
// ABOUTME: Foundation crate with error handling, wire models, form validation, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

#![deny(unsafe_code)]

//! # Metafit Core
//!
//! Foundation crate providing shared types for the Metafit client. Nothing in
//! here performs I/O, so it changes rarely and compiles once for the whole
//! workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and field-level `ValidationError`
//! - **constants**: API endpoints, profile limits, storage keys, and environment variable names
//! - **models**: Wire models exchanged with the Metafit backend
//! - **forms**: Client-side form validation that runs before any request is issued

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Data models (User, `WeightRecord`, Meal, Exercise, `DailyPlan`)
pub mod models;

/// Client-side validation for login, registration, profile, and weight forms
pub mod forms;
