//! Normalized input records handed over by the ingestion layer.
//!
//! All records are immutable value types: they are produced once when the
//! source files are loaded and only read afterwards.

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::{DataFrame, PolarsResult};
use serde::{Deserialize, Serialize};

use super::tables::TableRow;
use crate::define_key_type;

define_key_type!(SessionId);
define_key_type!(ShipName);

/// Source label for a navigating event.
pub const NAVIGATING_LABEL: &str = "NAVEGACAO";
/// Source label for an in-port event.
pub const IN_PORT_LABEL: &str = "EM PORTO";

/// Category of a vessel-activity event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum EventKind {
    Navigating,
    InPort,
    Other(String),
}

impl EventKind {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            NAVIGATING_LABEL => EventKind::Navigating,
            IN_PORT_LABEL => EventKind::InPort,
            other => EventKind::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            EventKind::Navigating => NAVIGATING_LABEL,
            EventKind::InPort => IN_PORT_LABEL,
            EventKind::Other(label) => label,
        }
    }
}

impl From<String> for EventKind {
    fn from(label: String) -> Self {
        EventKind::from_label(&label)
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        kind.label().to_string()
    }
}

/// One vessel-activity record (a voyage segment, port call, anchorage...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub session_id: SessionId,
    pub ship_name: ShipName,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub event_name: Option<EventKind>,
    pub duration: Option<qtty::Hours>,
    pub latitude: Option<qtty::Degrees>,
    pub longitude: Option<qtty::Degrees>,
}

impl Event {
    /// Create an event with only its keys set.
    pub fn new(session_id: impl Into<SessionId>, ship_name: impl Into<ShipName>) -> Self {
        Self {
            session_id: session_id.into(),
            ship_name: ship_name.into(),
            start_time: None,
            end_time: None,
            event_name: None,
            duration: None,
            latitude: None,
            longitude: None,
        }
    }

    pub fn with_kind(mut self, kind: EventKind) -> Self {
        self.event_name = Some(kind);
        self
    }

    pub fn with_window(mut self, start: NaiveDateTime, end: Option<NaiveDateTime>) -> Self {
        self.start_time = Some(start);
        self.end_time = end;
        self
    }

    pub fn with_duration_hours(mut self, hours: f64) -> Self {
        self.duration = Some(qtty::Hours::new(hours));
        self
    }

    pub fn with_position(mut self, latitude: f64, longitude: Option<f64>) -> Self {
        self.latitude = Some(qtty::Degrees::new(latitude));
        self.longitude = longitude.map(qtty::Degrees::new);
        self
    }

    pub fn is_navigating(&self) -> bool {
        matches!(self.event_name, Some(EventKind::Navigating))
    }

    pub fn is_in_port(&self) -> bool {
        matches!(self.event_name, Some(EventKind::InPort))
    }
}

/// Fuel consumed during one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionRecord {
    pub session_id: SessionId,
    pub consumed_quantity: f64,
}

impl ConsumptionRecord {
    /// Missing or non-finite quantities are coerced to zero.
    pub fn new(session_id: impl Into<SessionId>, consumed_quantity: Option<f64>) -> Self {
        Self {
            session_id: session_id.into(),
            consumed_quantity: consumed_quantity.filter(|q| q.is_finite()).unwrap_or(0.0),
        }
    }
}

/// One hull anti-fouling coating application with its two regulatory thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoatingApplication {
    pub ship_name: ShipName,
    pub application_date: NaiveDate,
    /// `T_base`: baseline verification period, in months.
    pub baseline_months: f64,
    /// `T_max`: maximum accumulated idle period, in months.
    pub max_idle_months: f64,
}

impl CoatingApplication {
    pub fn new(
        ship_name: impl Into<ShipName>,
        application_date: NaiveDate,
        baseline_months: f64,
        max_idle_months: f64,
    ) -> Self {
        Self {
            ship_name: ship_name.into(),
            application_date,
            baseline_months,
            max_idle_months,
        }
    }
}

/// Fouling types that flag a report as hard/calcareous fouling.
const HARD_FOULING_MARKERS: [&str; 3] = ["duras", "craca", "calcárea"];

/// Hull inspection report.
///
/// The fouling flag is an informational signal only; it does not feed the
/// biofouling risk score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionReport {
    pub ship_name: ShipName,
    pub report_date: NaiveDate,
    pub fouling_risk: bool,
}

impl InspectionReport {
    pub fn new(ship_name: impl Into<ShipName>, report_date: NaiveDate, fouling_type: Option<&str>) -> Self {
        Self {
            ship_name: ship_name.into(),
            report_date,
            fouling_risk: fouling_type.is_some_and(is_hard_fouling),
        }
    }
}

/// Case-insensitive match against the hard/barnacle/calcareous fouling markers.
pub fn is_hard_fouling(fouling_type: &str) -> bool {
    let lowered = fouling_type.to_lowercase();
    HARD_FOULING_MARKERS.iter().any(|marker| lowered.contains(marker))
}

impl TableRow for InspectionReport {
    const COLUMNS: &'static [&'static str] = &["ship_name", "report_date", "fouling_risk"];

    fn to_frame(rows: &[Self]) -> PolarsResult<DataFrame> {
        let ships: Vec<String> = rows.iter().map(|r| r.ship_name.to_string()).collect();
        let dates: Vec<String> = rows.iter().map(|r| r.report_date.to_string()).collect();
        let flags: Vec<bool> = rows.iter().map(|r| r.fouling_risk).collect();
        polars::df!(
            Self::COLUMNS[0] => ships,
            Self::COLUMNS[1] => dates,
            Self::COLUMNS[2] => flags,
        )
    }
}
