//! Consolidation of events and fuel consumption into one table per session.

use log::debug;
use std::collections::{HashMap, HashSet};

use crate::models::{ConsolidatedRecord, ConsumptionRecord, Event, SessionId, Table};

/// Join events with their consumption, one row per session.
///
/// Events are deduplicated on `session_id` keeping the first occurrence, then
/// inner-joined with the first consumption record of the same session.
/// Sessions without consumption are dropped, as are deduplicated events that
/// lack a start time or event name.
///
/// # Returns
/// An empty table when either input is empty.
pub fn consolidate(
    events: &[Event],
    consumption: &[ConsumptionRecord],
) -> Table<ConsolidatedRecord> {
    if events.is_empty() || consumption.is_empty() {
        return Table::empty();
    }

    let mut quantities: HashMap<&SessionId, f64> = HashMap::with_capacity(consumption.len());
    for record in consumption {
        quantities
            .entry(&record.session_id)
            .or_insert(record.consumed_quantity);
    }

    let mut seen: HashSet<&SessionId> = HashSet::with_capacity(events.len());
    let mut incomplete = 0usize;
    let mut rows = Vec::new();

    for event in events {
        if !seen.insert(&event.session_id) {
            continue;
        }
        let Some(&consumed_quantity) = quantities.get(&event.session_id) else {
            continue;
        };
        let (Some(start_time), Some(event_name)) = (event.start_time, event.event_name.as_ref())
        else {
            incomplete += 1;
            continue;
        };

        rows.push(ConsolidatedRecord {
            session_id: event.session_id.clone(),
            ship_name: event.ship_name.clone(),
            start_time,
            event_name: event_name.clone(),
            consumed_quantity,
        });
    }

    if incomplete > 0 {
        debug!(
            "Skipped {} consumed sessions without start time or event name",
            incomplete
        );
    }
    debug!(
        "Consolidated {} sessions from {} events and {} consumption records",
        rows.len(),
        events.len(),
        consumption.len()
    );

    Table::new(rows)
}
