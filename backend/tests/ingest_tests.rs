//! Loading the CSV exports from disk.

mod support;

use fleet_health::config::DataConfig;
use fleet_health::ingest::{self, load_coatings, load_consumption, load_events, IngestError};
use fleet_health::models::ShipName;
use fleet_health::services::FleetSnapshot;
use support::{date, write_file, write_scenario_files};
use tempfile::TempDir;

#[test]
fn test_load_scenario_files() {
    let dir = TempDir::new().unwrap();
    let config = write_scenario_files(dir.path());

    let tables = ingest::load_tables(&config).unwrap();
    assert_eq!(tables.events.len(), 1);
    assert_eq!(tables.consumption.len(), 1);
    assert_eq!(tables.consumption[0].consumed_quantity, 100.0);
    assert_eq!(tables.coatings.len(), 1);
    assert_eq!(tables.coatings[0].application_date, date(2023, 7, 1));
    assert_eq!(tables.coatings[0].max_idle_months, 12.0);
    assert_eq!(tables.inspections.len(), 1);
    assert!(tables.inspections[0].fouling_risk);

    let event = &tables.events[0];
    assert!(event.is_navigating());
    assert_eq!(event.latitude.map(|d| d.value()), Some(5.0));
}

#[test]
fn test_snapshot_from_files_matches_scenario() {
    let dir = TempDir::new().unwrap();
    let config = write_scenario_files(dir.path());

    let snapshot = FleetSnapshot::load(&config, date(2024, 1, 31)).unwrap();
    assert_eq!(snapshot.total_vessels(), 1);
    assert_eq!(snapshot.daily_navigation().len(), 3);
    assert_eq!(snapshot.biofouling_risk().rows()[0].risk_level, 4);
}

#[test]
fn test_missing_files_yield_empty_tables() {
    let dir = TempDir::new().unwrap();
    let tables = ingest::load_tables(&DataConfig::in_dir(dir.path())).unwrap();
    assert!(tables.events.is_empty());
    assert!(tables.consumption.is_empty());
    assert!(tables.coatings.is_empty());
    assert!(tables.inspections.is_empty());
}

#[test]
fn test_missing_required_column_is_schema_error() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "events.csv",
        "sessionId,shipName,startGMTDate\n1,A,2024-01-01 00:00:00\n",
    );

    match load_events(&path) {
        Err(IngestError::Schema { table, missing }) => {
            assert_eq!(table, "events");
            assert_eq!(missing, vec!["endGMTDate".to_string(), "eventName".to_string()]);
        }
        other => panic!("expected schema error, got {:?}", other.map(|rows| rows.len())),
    }
}

#[test]
fn test_quoted_headers_and_semicolons() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "consumo.csv",
        "\" SESSION_ID \";\"CONSUMED_QUANTITY\"\n7;12,5\n8;\n",
    );

    let records = load_consumption(&path).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].session_id.as_str(), "7");
    assert_eq!(records[0].consumed_quantity, 12.5);
    assert_eq!(records[1].consumed_quantity, 0.0);
}

#[test]
fn test_latin1_coatings_are_decoded() {
    let dir = TempDir::new().unwrap();
    let text = "Nome do navio;Data da aplicacao;Cr1. Período base de verificação;Cr1. Parada máxima acumulada no período\n\
                ORIÃO;10/03/2023;6;12\nB;;6;12\n";
    let bytes: Vec<u8> = text.chars().map(|c| u8::try_from(u32::from(c)).unwrap()).collect();
    assert!(std::str::from_utf8(&bytes).is_err());
    let path = dir.path().join("revestimento.csv");
    std::fs::write(&path, bytes).unwrap();

    let coatings = load_coatings(&path).unwrap();
    assert_eq!(coatings.len(), 1);
    assert_eq!(coatings[0].application_date, date(2023, 3, 10));
    assert_eq!(coatings[0].baseline_months, 6.0);
    assert_eq!(coatings[0].ship_name, ShipName::new("ORIÃO"));
}
