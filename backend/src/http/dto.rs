//! Data Transfer Objects for the HTTP API.
//!
//! Result tables are serialized as-is (`{"columns": [...], "rows": [...]}`);
//! these types only add the envelope around them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Table, TableRow, WeatherObservation};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// `loaded` or `unavailable`
    pub data: String,
}

/// A scalar fleet metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    pub metric: String,
    pub value: usize,
}

/// A table-shaped fleet metric.
#[derive(Debug, Clone, Serialize)]
#[serde(bound(serialize = "T: TableRow + Serialize"))]
pub struct MetricTable<T> {
    pub metric: String,
    pub data: Table<T>,
}

impl<T: TableRow> MetricTable<T> {
    pub fn new(metric: &str, data: Table<T>) -> Self {
        Self {
            metric: metric.to_string(),
            data,
        }
    }
}

/// Hourly weather observations for one vessel.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherResponse {
    pub ship_name: String,
    pub observations: Table<WeatherObservation>,
}

/// Result of a snapshot reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub status: String,
    pub as_of: NaiveDate,
    pub loaded_at: DateTime<Utc>,
    pub total_vessels: usize,
    pub compliance_records: usize,
}
