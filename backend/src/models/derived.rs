//! Row types of the tables derived by the engine.

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::{DataFrame, PolarsResult};
use serde::{Deserialize, Serialize};

use super::period::MonthPeriod;
use super::records::{EventKind, SessionId, ShipName};
use super::tables::TableRow;

/// One session after joining its event with its fuel consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedRecord {
    pub session_id: SessionId,
    pub ship_name: ShipName,
    pub start_time: NaiveDateTime,
    pub event_name: EventKind,
    pub consumed_quantity: f64,
}

impl TableRow for ConsolidatedRecord {
    const COLUMNS: &'static [&'static str] = &[
        "session_id",
        "ship_name",
        "start_time",
        "event_name",
        "consumed_quantity",
    ];

    fn to_frame(rows: &[Self]) -> PolarsResult<DataFrame> {
        let sessions: Vec<String> = rows.iter().map(|r| r.session_id.to_string()).collect();
        let ships: Vec<String> = rows.iter().map(|r| r.ship_name.to_string()).collect();
        let starts: Vec<String> = rows
            .iter()
            .map(|r| r.start_time.format("%Y-%m-%d %H:%M:%S").to_string())
            .collect();
        let events: Vec<String> = rows.iter().map(|r| r.event_name.label().to_string()).collect();
        let quantities: Vec<f64> = rows.iter().map(|r| r.consumed_quantity).collect();
        polars::df!(
            Self::COLUMNS[0] => sessions,
            Self::COLUMNS[1] => ships,
            Self::COLUMNS[2] => starts,
            Self::COLUMNS[3] => events,
            Self::COLUMNS[4] => quantities,
        )
    }
}

/// Total fuel consumed in a calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyConsumption {
    pub month: MonthPeriod,
    pub total_consumption: f64,
}

impl TableRow for MonthlyConsumption {
    const COLUMNS: &'static [&'static str] = &["month", "total_consumption"];

    fn to_frame(rows: &[Self]) -> PolarsResult<DataFrame> {
        let months: Vec<String> = rows.iter().map(|r| r.month.to_string()).collect();
        let totals: Vec<f64> = rows.iter().map(|r| r.total_consumption).collect();
        polars::df!(
            Self::COLUMNS[0] => months,
            Self::COLUMNS[1] => totals,
        )
    }
}

/// Number of distinct vessels navigating on a calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyNavigation {
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub navigating_vessels: u32,
}

impl TableRow for DailyNavigation {
    const COLUMNS: &'static [&'static str] = &["date", "navigating_vessels"];

    fn to_frame(rows: &[Self]) -> PolarsResult<DataFrame> {
        let dates: Vec<String> = rows.iter().map(|r| r.date.to_string()).collect();
        let counts: Vec<u32> = rows.iter().map(|r| r.navigating_vessels).collect();
        polars::df!(
            Self::COLUMNS[0] => dates,
            Self::COLUMNS[1] => counts,
        )
    }
}

/// Coating compliance of one vessel at the end of one month, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceRecord {
    pub month: MonthPeriod,
    pub ship_name: ShipName,
    pub compliance_percent: f64,
}

impl TableRow for ComplianceRecord {
    const COLUMNS: &'static [&'static str] = &["month", "ship_name", "compliance_percent"];

    fn to_frame(rows: &[Self]) -> PolarsResult<DataFrame> {
        let months: Vec<String> = rows.iter().map(|r| r.month.to_string()).collect();
        let ships: Vec<String> = rows.iter().map(|r| r.ship_name.to_string()).collect();
        let values: Vec<f64> = rows.iter().map(|r| r.compliance_percent).collect();
        polars::df!(
            Self::COLUMNS[0] => months,
            Self::COLUMNS[1] => ships,
            Self::COLUMNS[2] => values,
        )
    }
}

/// Monthly biofouling risk level (1-5) of one vessel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRecord {
    pub ship_name: ShipName,
    pub month: MonthPeriod,
    pub risk_level: u8,
}

impl TableRow for RiskRecord {
    const COLUMNS: &'static [&'static str] = &["ship_name", "month", "risk_level"];

    fn to_frame(rows: &[Self]) -> PolarsResult<DataFrame> {
        let ships: Vec<String> = rows.iter().map(|r| r.ship_name.to_string()).collect();
        let months: Vec<String> = rows.iter().map(|r| r.month.to_string()).collect();
        let levels: Vec<i32> = rows.iter().map(|r| i32::from(r.risk_level)).collect();
        polars::df!(
            Self::COLUMNS[0] => ships,
            Self::COLUMNS[1] => months,
            Self::COLUMNS[2] => levels,
        )
    }
}

/// One hourly observation returned by the weather archive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Local timestamp as returned by the archive (`YYYY-MM-DDTHH:MM`).
    pub time: String,
    pub temperature_2m: Option<f64>,
    pub apparent_temperature: Option<f64>,
}

impl TableRow for WeatherObservation {
    const COLUMNS: &'static [&'static str] = &["time", "temperature_2m", "apparent_temperature"];

    fn to_frame(rows: &[Self]) -> PolarsResult<DataFrame> {
        let times: Vec<String> = rows.iter().map(|r| r.time.clone()).collect();
        let temperatures: Vec<Option<f64>> = rows.iter().map(|r| r.temperature_2m).collect();
        let apparent: Vec<Option<f64>> = rows.iter().map(|r| r.apparent_temperature).collect();
        polars::df!(
            Self::COLUMNS[0] => times,
            Self::COLUMNS[1] => temperatures,
            Self::COLUMNS[2] => apparent,
        )
    }
}
