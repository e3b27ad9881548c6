// ABOUTME: HTTP client construction with connection pooling and timeout configuration
// ABOUTME: One reqwest client per configuration, reused across every backend call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

use crate::config::ClientConfig;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

fn user_agent() -> String {
    format!("metafit-client/{}", env!("CARGO_PKG_VERSION"))
}

/// Create a new HTTP client with custom timeout settings
///
/// Falls back to a default client if the builder fails.
#[must_use]
pub fn create_client_with_timeout(timeout: Duration, connect_timeout: Duration) -> Client {
    ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .user_agent(user_agent())
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Create the HTTP client described by a client configuration
#[must_use]
pub fn client_for(config: &ClientConfig) -> Client {
    create_client_with_timeout(config.request_timeout, config.connect_timeout)
}
