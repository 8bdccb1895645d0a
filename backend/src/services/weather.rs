//! Historical weather lookup along a vessel's operating area.
//!
//! Observations come from an ERA5-style hourly archive. Long spans are split
//! into chunks the archive accepts; chunks that fail are logged and skipped so
//! a partial history is still returned.

use chrono::{Days, NaiveDate};
use log::{debug, warn};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::WeatherSettings;
use crate::models::{Event, Table, WeatherObservation};

const HOURLY_VARIABLES: &str = "temperature_2m,apparent_temperature";

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Weather archive request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Weather archive returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse weather archive response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Where and when to query the archive for one vessel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub window: DateWindow,
}

/// Derive the archive query for a vessel from its events.
///
/// The position is taken from the first event with both coordinates. The
/// window spans the earliest start date to the latest end date, with the
/// start clamped to `earliest`. Returns `None` when no position or no valid
/// window exists.
pub fn query_window(events: &[&Event], earliest: NaiveDate) -> Option<WeatherQuery> {
    let (latitude, longitude) = events
        .iter()
        .find_map(|e| Some((e.latitude?.value(), e.longitude?.value())))?;

    let first_start = events.iter().filter_map(|e| e.start_time).min()?.date();
    let last_end = events.iter().filter_map(|e| e.end_time).max()?.date();

    let start = first_start.max(earliest);
    if start > last_end {
        return None;
    }

    Some(WeatherQuery {
        latitude,
        longitude,
        window: DateWindow {
            start,
            end: last_end,
        },
    })
}

/// Split `window` into consecutive chunks of at most `chunk_days` days.
pub fn plan_chunks(window: DateWindow, chunk_days: u32) -> Vec<DateWindow> {
    let span = Days::new(u64::from(chunk_days.max(1)) - 1);
    let mut chunks = Vec::new();
    let mut current = window.start;

    while current <= window.end {
        let chunk_end = current
            .checked_add_days(span)
            .map_or(window.end, |d| d.min(window.end));
        chunks.push(DateWindow {
            start: current,
            end: chunk_end,
        });
        match chunk_end.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }

    chunks
}

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    hourly: Option<HourlySeries>,
}

#[derive(Debug, Default, Deserialize)]
struct HourlySeries {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    apparent_temperature: Vec<Option<f64>>,
}

impl HourlySeries {
    fn into_observations(self) -> Vec<WeatherObservation> {
        let mut temperatures = self.temperature_2m.into_iter();
        let mut apparent = self.apparent_temperature.into_iter();
        self.time
            .into_iter()
            .map(|time| WeatherObservation {
                time,
                temperature_2m: temperatures.next().flatten(),
                apparent_temperature: apparent.next().flatten(),
            })
            .collect()
    }
}

/// Parse an archive response body into observations.
///
/// A body without an `hourly` block yields no observations.
pub fn parse_archive_response(body: &str) -> Result<Vec<WeatherObservation>, WeatherError> {
    let response: ArchiveResponse = serde_json::from_str(body)?;
    Ok(response
        .hourly
        .map(HourlySeries::into_observations)
        .unwrap_or_default())
}

/// Client for the hourly weather archive.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    settings: WeatherSettings,
}

impl WeatherClient {
    pub fn new(settings: WeatherSettings) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(WeatherError::Client)?;
        Ok(Self { http, settings })
    }

    pub fn settings(&self) -> &WeatherSettings {
        &self.settings
    }

    /// Fetch one chunk of hourly observations.
    pub async fn fetch_chunk(
        &self,
        latitude: f64,
        longitude: f64,
        window: DateWindow,
    ) -> Result<Vec<WeatherObservation>, WeatherError> {
        let start_date = window.start.format("%Y-%m-%d").to_string();
        let end_date = window.end.format("%Y-%m-%d").to_string();
        let params = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("hourly", HOURLY_VARIABLES.to_string()),
            ("timezone", self.settings.timezone.clone()),
            ("start_date", start_date),
            ("end_date", end_date),
        ];

        let response = self
            .http
            .get(&self.settings.base_url)
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(WeatherError::Status {
                status,
                body: body.trim().to_string(),
            });
        }

        parse_archive_response(&body)
    }

    /// Hourly observations covering the operating period of a vessel.
    ///
    /// Returns an empty table when the events give no position or window.
    pub async fn vessel_weather(&self, events: &[&Event]) -> Table<WeatherObservation> {
        let Some(query) = query_window(events, self.settings.earliest_date) else {
            return Table::empty();
        };

        let chunks = plan_chunks(query.window, self.settings.chunk_days);
        debug!(
            "Fetching weather at ({}, {}) for {} to {} in {} chunks",
            query.latitude,
            query.longitude,
            query.window.start,
            query.window.end,
            chunks.len()
        );

        let mut observations = Vec::new();
        for chunk in chunks {
            match self
                .fetch_chunk(query.latitude, query.longitude, chunk)
                .await
            {
                Ok(rows) => observations.extend(rows),
                Err(e) => warn!(
                    "Skipping weather chunk {} to {}: {}",
                    chunk.start, chunk.end, e
                ),
            }
        }

        Table::new(observations)
    }
}
