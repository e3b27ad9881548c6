// ABOUTME: Configuration module for the Metafit client
// ABOUTME: Environment-driven settings for the backend connection and session persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

//! Configuration
//!
//! - **Environment**: client configuration from environment variables

/// Environment-based client configuration
pub mod environment;

pub use environment::{default_token_path, AuthScheme, ClientConfig, RetryPolicy};
