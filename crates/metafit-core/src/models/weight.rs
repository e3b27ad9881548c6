// ABOUTME: Weight observation model with lenient date decoding
// ABOUTME: Accepts plain dates or full ISO timestamps and the legacy `peso` field name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single weight observation. Never mutated once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRecord {
    /// Calendar day of the observation
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub date: NaiveDate,
    /// Weight in kilograms
    #[serde(alias = "peso")]
    pub weight: f64,
}

impl WeightRecord {
    /// Create a record
    #[must_use]
    pub const fn new(date: NaiveDate, weight: f64) -> Self {
        Self { date, weight }
    }
}

/// Body of `POST /progress`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NewWeightRecord {
    /// Observation time
    pub date: DateTime<Utc>,
    /// Weight in kilograms
    pub weight: f64,
}

/// Decode `2024-01-01`, `2024-01-01T10:00:00Z`, or `2024-01-01T10:00:00.000+02:00`
fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid date '{raw}', expected YYYY-MM-DD or RFC 3339"))
    })
}

/// Parse a calendar date from a plain date or an RFC 3339 timestamp (UTC day)
#[must_use]
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|timestamp| timestamp.with_timezone(&Utc).date_naive())
    })
}
