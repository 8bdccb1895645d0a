#![allow(dead_code)]

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{NaiveDate, NaiveDateTime};
use fleet_health::config::DataConfig;
use fleet_health::models::{
    CoatingApplication, ConsumptionRecord, Event, EventKind, InspectionReport,
};
use fleet_health::services::FleetTables;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the variables on unwind and serializes access to the process
/// environment across parallel tests.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(0, 0, 0).unwrap()
}

/// Ship "A" navigating 2024-01-05..07 at latitude 5, 100 units of fuel,
/// coated on 2023-07-01 with `T_base = 6`, `T_max = 12`.
pub fn scenario_tables() -> FleetTables {
    FleetTables {
        events: vec![Event::new("1", "A")
            .with_kind(EventKind::Navigating)
            .with_window(at(2024, 1, 5), Some(at(2024, 1, 7)))
            .with_duration_hours(48.0)
            .with_position(5.0, Some(-35.0))],
        consumption: vec![ConsumptionRecord::new("1", Some(100.0))],
        coatings: vec![CoatingApplication::new("A", date(2023, 7, 1), 6.0, 12.0)],
        inspections: vec![InspectionReport::new("A", date(2023, 12, 15), Some("Craca"))],
    }
}

pub const EVENTS_CSV: &str = "\
sessionId,shipName,startGMTDate,endGMTDate,eventName,duration,decLatitude,decLongitude
1,A,2024-01-05 00:00:00,2024-01-07 00:00:00,NAVEGACAO,48,5.0,-35.0
";

pub const CONSUMPTION_CSV: &str = "\
SESSION_ID;CONSUMED_QUANTITY
1;100
";

pub const COATINGS_CSV: &str = "\
Nome do navio;Data da aplicacao;Cr1. Período base de verificação;Cr1. Parada máxima acumulada no período
A;01/07/2023;6;12
";

pub const INSPECTIONS_CSV: &str = "\
Embarcação,Data,Tipo de incrustação da embarcação
A,15/12/2023,Craca
";

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Write the scenario exports into `dir` under the default file names.
pub fn write_scenario_files(dir: &Path) -> DataConfig {
    let config = DataConfig::in_dir(dir);
    write_file(dir, &config.events_file, EVENTS_CSV);
    write_file(dir, &config.consumption_file, CONSUMPTION_CSV);
    write_file(dir, &config.coatings_file, COATINGS_CSV);
    write_file(dir, &config.inspections_file, INSPECTIONS_CSV);
    config
}
