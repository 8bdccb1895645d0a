//! Monthly biofouling risk scoring.
//!
//! The risk level of a vessel in a month combines three partial scores:
//!
//! | Score    | Input                          | Buckets                          |
//! |----------|--------------------------------|----------------------------------|
//! | `R_base` | mean absolute latitude         | `< 20°` → 2.5, else 1.0          |
//! | `R_exp`  | days spent in port             | `> 10` → 1.5, `(3, 10]` → 0.5    |
//! | `R_coat` | coating compliance (%)         | `< 25` → 1.0, `[25, 75)` → 0.5   |
//!
//! The sum is clamped to `[1, 5]` and then rounded half-up.

use log::debug;
use std::collections::{BTreeMap, HashMap};

use crate::models::{ComplianceRecord, Event, MonthPeriod, RiskRecord, ShipName, Table};

/// Compliance assumed for a vessel/month absent from the compliance table.
pub const DEFAULT_COMPLIANCE_PERCENT: f64 = 100.0;

pub const MIN_RISK_LEVEL: u8 = 1;
pub const MAX_RISK_LEVEL: u8 = 5;

const TROPICAL_LATITUDE_DEG: f64 = 20.0;
const HOURS_PER_DAY: f64 = 24.0;

/// Latitude partial score from the mean absolute latitude of a month.
pub fn latitude_score(mean_abs_latitude: f64) -> f64 {
    if mean_abs_latitude < TROPICAL_LATITUDE_DEG {
        2.5
    } else {
        1.0
    }
}

/// Idle-time partial score from the days spent in port during a month.
pub fn exposure_score(port_days: f64) -> f64 {
    if port_days > 10.0 {
        1.5
    } else if port_days > 3.0 {
        0.5
    } else {
        0.0
    }
}

/// Coating partial score from the compliance percentage of a month.
pub fn coating_score(compliance_percent: f64) -> f64 {
    if compliance_percent < 25.0 {
        1.0
    } else if compliance_percent < 75.0 {
        0.5
    } else {
        0.0
    }
}

/// Integer risk level of a summed score: clamp to `[1, 5]`, then round half-up.
pub fn risk_level(total: f64) -> u8 {
    let clamped = total.clamp(f64::from(MIN_RISK_LEVEL), f64::from(MAX_RISK_LEVEL));
    clamped.round() as u8
}

/// Per-month exposure aggregate of one vessel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthlyExposure {
    latitude_sum: f64,
    samples: usize,
    pub port_hours: f64,
}

impl MonthlyExposure {
    fn record(&mut self, event: &Event, latitude: f64) {
        self.latitude_sum += latitude.abs();
        self.samples += 1;
        if event.is_in_port() {
            self.port_hours += event.duration.map(|h| h.value()).unwrap_or(0.0);
        }
    }

    pub fn mean_abs_latitude(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.latitude_sum / self.samples as f64
        }
    }

    pub fn port_days(&self) -> f64 {
        self.port_hours / HOURS_PER_DAY
    }
}

/// Partial scores behind one risk level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskBreakdown {
    pub latitude: f64,
    pub exposure: f64,
    pub coating: f64,
}

impl RiskBreakdown {
    pub fn evaluate(exposure: &MonthlyExposure, compliance_percent: f64) -> Self {
        Self {
            latitude: latitude_score(exposure.mean_abs_latitude()),
            exposure: exposure_score(exposure.port_days()),
            coating: coating_score(compliance_percent),
        }
    }

    pub fn total(&self) -> f64 {
        self.latitude + self.exposure + self.coating
    }

    pub fn level(&self) -> u8 {
        risk_level(self.total())
    }
}

/// Group the eligible events of every vessel by calendar month.
///
/// Events missing a start time, a latitude or an event name are ignored.
/// Vessels keep their order of first appearance in `events`, eligible or not;
/// vessels without any eligible event are left out.
pub fn monthly_exposure(events: &[Event]) -> Vec<(ShipName, BTreeMap<MonthPeriod, MonthlyExposure>)> {
    let mut index: HashMap<&ShipName, usize> = HashMap::new();
    let mut vessels: Vec<(ShipName, BTreeMap<MonthPeriod, MonthlyExposure>)> = Vec::new();

    for event in events {
        let slot = *index.entry(&event.ship_name).or_insert_with(|| {
            vessels.push((event.ship_name.clone(), BTreeMap::new()));
            vessels.len() - 1
        });

        let (Some(start), Some(latitude), Some(_)) =
            (event.start_time, event.latitude, event.event_name.as_ref())
        else {
            continue;
        };

        vessels[slot]
            .1
            .entry(MonthPeriod::of_datetime(&start))
            .or_default()
            .record(event, latitude.value());
    }

    vessels.retain(|(_, months)| !months.is_empty());
    vessels
}

/// Score every vessel/month with eligible events.
///
/// Compliance is looked up per vessel and month in `compliance`; missing
/// entries default to [`DEFAULT_COMPLIANCE_PERCENT`].
pub fn score_fleet_risk(events: &[Event], compliance: &Table<ComplianceRecord>) -> Table<RiskRecord> {
    let mut lookup: HashMap<&ShipName, HashMap<MonthPeriod, f64>> = HashMap::new();
    for record in compliance {
        lookup
            .entry(&record.ship_name)
            .or_default()
            .insert(record.month, record.compliance_percent);
    }

    let mut rows = Vec::new();
    for (ship, months) in monthly_exposure(events) {
        for (month, exposure) in months {
            let percent = lookup
                .get(&ship)
                .and_then(|by_month| by_month.get(&month))
                .copied()
                .unwrap_or(DEFAULT_COMPLIANCE_PERCENT);
            let breakdown = RiskBreakdown::evaluate(&exposure, percent);
            debug!(
                "Risk {} {}: base={} exposure={} coating={} -> {}",
                ship,
                month,
                breakdown.latitude,
                breakdown.exposure,
                breakdown.coating,
                breakdown.level()
            );
            rows.push(RiskRecord {
                ship_name: ship.clone(),
                month,
                risk_level: breakdown.level(),
            });
        }
    }

    Table::new(rows)
}

#[cfg(test)]
#[path = "risk_tests.rs"]
mod tests;
