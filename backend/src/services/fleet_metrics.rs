//! Stateless fleet-wide aggregations over events and consolidated sessions.

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};

use crate::models::{
    ConsolidatedRecord, DailyNavigation, Event, MonthPeriod, MonthlyConsumption, ShipName, Table,
};

/// Number of distinct vessels across all events.
pub fn vessel_count(events: &[Event]) -> usize {
    events
        .iter()
        .map(|e| &e.ship_name)
        .collect::<HashSet<_>>()
        .len()
}

/// Number of distinct vessels with at least one navigating event.
///
/// This counts vessels that have *ever* navigated in the loaded data, not
/// vessels navigating right now.
pub fn navigating_vessel_count(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|e| e.is_navigating())
        .map(|e| &e.ship_name)
        .collect::<HashSet<_>>()
        .len()
}

/// Fuel consumed per calendar month of the session start, months ascending.
pub fn monthly_consumption(consolidated: &Table<ConsolidatedRecord>) -> Table<MonthlyConsumption> {
    let mut totals: BTreeMap<MonthPeriod, f64> = BTreeMap::new();
    for record in consolidated {
        *totals
            .entry(MonthPeriod::of_datetime(&record.start_time))
            .or_insert(0.0) += record.consumed_quantity;
    }

    totals
        .into_iter()
        .map(|(month, total_consumption)| MonthlyConsumption {
            month,
            total_consumption,
        })
        .collect()
}

/// Distinct navigating vessels per calendar day, days ascending.
///
/// Each navigating event with both timestamps covers every calendar day from
/// its start date through its end date inclusive. Events ending before they
/// start cover nothing.
pub fn daily_navigation(events: &[Event]) -> Table<DailyNavigation> {
    let mut vessels_by_day: BTreeMap<NaiveDate, HashSet<&ShipName>> = BTreeMap::new();

    for event in events.iter().filter(|e| e.is_navigating()) {
        let (Some(start), Some(end)) = (event.start_time, event.end_time) else {
            continue;
        };
        let last = end.date();
        for day in start.date().iter_days().take_while(|d| *d <= last) {
            vessels_by_day
                .entry(day)
                .or_default()
                .insert(&event.ship_name);
        }
    }

    vessels_by_day
        .into_iter()
        .map(|(date, vessels)| DailyNavigation {
            date,
            navigating_vessels: vessels.len() as u32,
        })
        .collect()
}
