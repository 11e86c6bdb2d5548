//! Data Transfer Objects for the HTTP API.
//!
//! Responses reuse the domain models directly since they already derive
//! `Serialize`; only request envelopes and small summaries live here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::models::{RoaDuration, TimelineModel};
use crate::services::TimelineInput;

/// Request body for `POST /v1/timeline`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimelineRequest {
    /// Ingestions, ratings and timed notes
    #[serde(flatten)]
    pub input: TimelineInput,
    /// Instant used when there are no entries (default: server clock)
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
    /// Chart width the axis ticks are spaced for (default: configured width)
    #[serde(default)]
    pub expected_width_px: Option<f64>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the crate serving the API
    pub version: String,
    /// Number of substances in the catalog
    pub substances: usize,
}

/// Substance list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubstanceListResponse {
    /// Sorted display names
    pub substances: Vec<String>,
    /// Total count
    pub total: usize,
}
