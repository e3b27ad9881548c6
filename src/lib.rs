// ABOUTME: Main library entry point for the Metafit fitness client
// ABOUTME: Session management, backend API access, and progress reporting for the Metafit backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

#![deny(unsafe_code)]

//! # Metafit Client
//!
//! Client library for the Metafit fitness and nutrition backend, plus the
//! `metafit` command-line front end.
//!
//! ## Architecture
//!
//! - **Session**: `SessionManager` owns the token and the current user and
//!   publishes immutable `Session` snapshots
//! - **API**: `MetafitApi` abstracts the backend; `HttpApiClient` implements it
//!   over reqwest
//! - **Storage**: `TokenStore` persists the token between runs
//! - **Services**: progress, plans, catalog, and dashboard on top of the API
//! - **Intelligence**: pure progress, BMI, and recipe calculators
//!   (re-exported from `metafit-intelligence`)
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use metafit_client::api::HttpApiClient;
//! use metafit_client::config::ClientConfig;
//! use metafit_client::errors::AppResult;
//! use metafit_client::session::SessionManager;
//! use metafit_client::storage::FileTokenStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ClientConfig::from_env()?;
//!     let store = Arc::new(FileTokenStore::new(config.token_path.clone()));
//!     let api = Arc::new(HttpApiClient::new(config));
//!     let session = SessionManager::new(api, store);
//!
//!     if let Some(user) = session.load_user().await? {
//!         println!("Welcome back, {}", user.display_name());
//!     }
//!     Ok(())
//! }
//! ```

/// Backend API trait and its HTTP implementation
pub mod api;

/// Environment configuration
pub mod config;

/// Shared HTTP client construction
pub mod http_client;

/// Structured logging setup
pub mod logging;

/// Data services: progress, plans, catalog, dashboard
pub mod services;

/// Session snapshots and the session manager
pub mod session;

/// Token persistence
pub mod storage;

/// Unified error handling (re-exported from `metafit-core`)
pub use metafit_core::errors;

/// Endpoints, limits, and environment variable names (re-exported from `metafit-core`)
pub use metafit_core::constants;

/// Wire models (re-exported from `metafit-core`)
pub use metafit_core::models;

/// Form validation (re-exported from `metafit-core`)
pub use metafit_core::forms;

/// Pure calculators (re-exported from `metafit-intelligence`)
pub use metafit_intelligence as intelligence;
