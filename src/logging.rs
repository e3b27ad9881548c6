// ABOUTME: Logging configuration and structured logging setup for the Metafit client
// ABOUTME: Configures log level, output format, and structured auth and HTTP request events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

//! Structured logging
//!
//! All output goes to stderr so that command output on stdout stays
//! machine-readable.

use anyhow::{anyhow, Result};
use metafit_core::constants::service_names;
use serde_json::json;
use std::env;
use std::io;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include span enter/exit events
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` lines for log shipping
    Json,
    /// Multi-line human format
    Pretty,
    /// Single-line human format
    Compact,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value; anything unknown is compact
    #[must_use]
    pub fn from_str_lossy(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            _ => Self::Compact,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: LogFormat::Compact,
            include_location: false,
            include_spans: false,
            service_name: service_names::METAFIT_CLIENT.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let format = if cfg!(feature = "json-logs") {
            LogFormat::Json
        } else {
            env::var("LOG_FORMAT").map_or(defaults.format, |raw| LogFormat::from_str_lossy(&raw))
        };
        Self {
            level: env::var("RUST_LOG").unwrap_or(defaults.level),
            format,
            include_location: env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_spans: env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME").unwrap_or(defaults.service_name),
            service_version: defaults.service_version,
        }
    }

    /// Raise the level to `debug` (the CLI `--verbose` flag)
    #[must_use]
    pub fn verbose(mut self) -> Self {
        "debug".clone_into(&mut self.level);
        self
    }

    /// Build the filter: the configured level plus noise reduction for the
    /// HTTP stack
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        let directives = [
            "hyper=warn".to_owned(),
            "hyper_util=warn".to_owned(),
            "reqwest=warn".to_owned(),
            "rustls=warn".to_owned(),
            format!("metafit_client={}", self.level),
            format!("metafit={}", self.level),
        ];
        directives
            .iter()
            .fold(EnvFilter::new(&self.level), |filter, directive| {
                filter.add_directive(
                    directive
                        .parse()
                        .unwrap_or_else(|_| tracing::Level::WARN.into()),
                )
            })
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let installed = match self.format {
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .json()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_target(true)
                        .with_writer(io::stderr)
                        .with_span_events(span_events),
                )
                .try_init(),
            LogFormat::Pretty => registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_target(true)
                        .with_writer(io::stderr)
                        .with_span_events(span_events),
                )
                .try_init(),
            LogFormat::Compact => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_target(false)
                        .with_writer(io::stderr)
                        .with_span_events(span_events),
                )
                .try_init(),
        };
        installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))?;

        self.log_startup_info();
        Ok(())
    }

    fn log_startup_info(&self) {
        let summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
            },
            "logging": {
                "level": self.level,
                "format": format!("{:?}", self.format),
                "location": self.include_location,
                "spans": self.include_spans,
            }
        });
        tracing::debug!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            "Logging initialized: {summary}"
        );
    }
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Application-specific logging utilities
pub struct AppLogger;

impl AppLogger {
    /// Log authentication events (login, register, restore, logout)
    pub fn log_auth_event(user_id: Option<&str>, event: &str, success: bool, details: Option<&str>) {
        if success {
            info!(
                user.id = user_id.unwrap_or("anonymous"),
                auth.event = %event,
                auth.success = true,
                auth.details = details.unwrap_or(""),
                "Authentication event"
            );
        } else {
            warn!(
                user.id = user_id.unwrap_or("anonymous"),
                auth.event = %event,
                auth.success = false,
                auth.details = details.unwrap_or(""),
                "Authentication event"
            );
        }
    }

    /// Log an outgoing API request once it completes
    ///
    /// `status` is `None` when the request never got a response.
    pub fn log_api_request(
        method: &str,
        path: &str,
        status: Option<u16>,
        duration: Duration,
        request_id: &str,
    ) {
        let duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        match status {
            Some(code) if code < 400 => info!(
                http.method = %method,
                http.path = %path,
                http.status = code,
                http.duration_ms = duration_ms,
                http.request_id = %request_id,
                "HTTP request"
            ),
            Some(code) => warn!(
                http.method = %method,
                http.path = %path,
                http.status = code,
                http.duration_ms = duration_ms,
                http.request_id = %request_id,
                "HTTP request failed"
            ),
            None => warn!(
                http.method = %method,
                http.path = %path,
                http.duration_ms = duration_ms,
                http.request_id = %request_id,
                "HTTP request got no response"
            ),
        }
    }

    /// Log local storage operations on the persisted token
    pub fn log_storage_operation(operation: &str, success: bool, details: Option<&str>) {
        if success {
            tracing::debug!(
                storage.operation = %operation,
                storage.success = true,
                "Token storage operation"
            );
        } else {
            warn!(
                storage.operation = %operation,
                storage.success = false,
                storage.details = details.unwrap_or(""),
                "Token storage operation failed"
            );
        }
    }
}
