//! Typed loaders for the four fleet source tables.

use log::{info, warn};
use polars::prelude::{DataFrame, StringChunked};
use std::io::ErrorKind;
use std::path::Path;

use super::csv_reader::read_table;
use super::dates::{parse_day_first_date, parse_number, parse_timestamp};
use super::error::{IngestError, IngestResult};
use super::schema::{
    TableSchema, COATINGS_SCHEMA, CONSUMPTION_SCHEMA, EVENTS_SCHEMA, INSPECTIONS_SCHEMA,
};
use crate::config::DataConfig;
use crate::models::{CoatingApplication, ConsumptionRecord, Event, EventKind, InspectionReport};
use crate::services::FleetTables;

fn text<'a>(df: &'a DataFrame, name: &str) -> IngestResult<&'a StringChunked> {
    Ok(df.column(name)?.str()?)
}

fn optional_text<'a>(df: &'a DataFrame, name: &str) -> IngestResult<Option<&'a StringChunked>> {
    match df.column(name) {
        Ok(column) => Ok(Some(column.str()?)),
        Err(_) => Ok(None),
    }
}

fn cell<'a>(column: &'a StringChunked, row: usize) -> Option<&'a str> {
    column.get(row).map(str::trim).filter(|v| !v.is_empty())
}

fn optional_cell<'a>(column: Option<&'a StringChunked>, row: usize) -> Option<&'a str> {
    column.and_then(|c| cell(c, row))
}

/// Convert a resolved events frame. Rows without a session id or ship name are dropped.
pub fn events_from_frame(df: &DataFrame) -> IngestResult<Vec<Event>> {
    let sessions = text(df, "sessionId")?;
    let ships = text(df, "shipName")?;
    let starts = text(df, "startGMTDate")?;
    let ends = text(df, "endGMTDate")?;
    let names = text(df, "eventName")?;
    let durations = optional_text(df, "duration")?;
    let latitudes = optional_text(df, "decLatitude")?;
    let longitudes = optional_text(df, "decLongitude")?;

    let mut events = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let (Some(session), Some(ship)) = (cell(sessions, row), cell(ships, row)) else {
            continue;
        };

        let mut event = Event::new(session, ship);
        event.start_time = cell(starts, row).and_then(parse_timestamp);
        event.end_time = cell(ends, row).and_then(parse_timestamp);
        event.event_name = cell(names, row).map(EventKind::from_label);
        event.duration = optional_cell(durations, row)
            .and_then(parse_number)
            .map(qtty::Hours::new);
        event.latitude = optional_cell(latitudes, row)
            .and_then(parse_number)
            .map(qtty::Degrees::new);
        event.longitude = optional_cell(longitudes, row)
            .and_then(parse_number)
            .map(qtty::Degrees::new);
        events.push(event);
    }
    Ok(events)
}

/// Convert a resolved consumption frame. Unparseable quantities become zero.
pub fn consumption_from_frame(df: &DataFrame) -> IngestResult<Vec<ConsumptionRecord>> {
    let sessions = text(df, "sessionId")?;
    let quantities = text(df, "consumedQuantity")?;

    Ok((0..df.height())
        .filter_map(|row| {
            let session = cell(sessions, row)?;
            let quantity = cell(quantities, row).and_then(parse_number);
            Some(ConsumptionRecord::new(session, quantity))
        })
        .collect())
}

/// Convert a resolved coatings frame, keeping only rows with a ship, a
/// day-first application date and both numeric thresholds.
pub fn coatings_from_frame(df: &DataFrame) -> IngestResult<Vec<CoatingApplication>> {
    let ships = text(df, "shipName")?;
    let dates = text(df, "applicationDate")?;
    let baselines = text(df, "baselineMonths")?;
    let max_idles = text(df, "maxIdleMonths")?;

    Ok((0..df.height())
        .filter_map(|row| {
            Some(CoatingApplication::new(
                cell(ships, row)?,
                cell(dates, row).and_then(parse_day_first_date)?,
                cell(baselines, row).and_then(parse_number)?,
                cell(max_idles, row).and_then(parse_number)?,
            ))
        })
        .collect())
}

/// Convert a resolved inspections frame, keeping rows with a ship and a date.
pub fn inspections_from_frame(df: &DataFrame) -> IngestResult<Vec<InspectionReport>> {
    let ships = text(df, "shipName")?;
    let dates = text(df, "reportDate")?;
    let fouling = text(df, "foulingType")?;

    Ok((0..df.height())
        .filter_map(|row| {
            Some(InspectionReport::new(
                cell(ships, row)?,
                cell(dates, row).and_then(parse_day_first_date)?,
                cell(fouling, row),
            ))
        })
        .collect())
}

/// Read one source file. A missing file yields an empty table.
fn load_with<T>(
    path: &Path,
    schema: &TableSchema,
    convert: fn(&DataFrame) -> IngestResult<Vec<T>>,
) -> IngestResult<Vec<T>> {
    match std::fs::metadata(path) {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(
                "Source file for '{}' not found at {}, using an empty table",
                schema.table,
                path.display()
            );
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(IngestError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    let df = read_table(path, schema)?;
    let rows = convert(&df)?;
    info!(
        "Loaded {} valid '{}' rows of {} from {}",
        rows.len(),
        schema.table,
        df.height(),
        path.display()
    );
    Ok(rows)
}

pub fn load_events(path: &Path) -> IngestResult<Vec<Event>> {
    load_with(path, &EVENTS_SCHEMA, events_from_frame)
}

pub fn load_consumption(path: &Path) -> IngestResult<Vec<ConsumptionRecord>> {
    load_with(path, &CONSUMPTION_SCHEMA, consumption_from_frame)
}

pub fn load_coatings(path: &Path) -> IngestResult<Vec<CoatingApplication>> {
    load_with(path, &COATINGS_SCHEMA, coatings_from_frame)
}

pub fn load_inspections(path: &Path) -> IngestResult<Vec<InspectionReport>> {
    load_with(path, &INSPECTIONS_SCHEMA, inspections_from_frame)
}

/// Load all four tables from the configured files.
pub fn load_tables(config: &DataConfig) -> IngestResult<FleetTables> {
    Ok(FleetTables {
        events: load_events(&config.events_path())?,
        consumption: load_consumption(&config.consumption_path())?,
        coatings: load_coatings(&config.coatings_path())?,
        inspections: load_inspections(&config.inspections_path())?,
    })
}
