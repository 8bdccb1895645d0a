//! Immutable, once-computed view of the fleet data.

use chrono::{DateTime, NaiveDate, Utc};
use log::info;
use std::collections::HashSet;

use crate::models::{
    CoatingApplication, ComplianceRecord, ConsolidatedRecord, ConsumptionRecord, DailyNavigation,
    Event, InspectionReport, MonthPeriod, MonthlyConsumption, RiskRecord, ShipName, Table,
};

use super::{compliance, consolidation, fleet_metrics, risk};
use crate::config::DataConfig;
use crate::ingest::{self, IngestResult};

/// The four normalized input tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FleetTables {
    pub events: Vec<Event>,
    pub consumption: Vec<ConsumptionRecord>,
    pub coatings: Vec<CoatingApplication>,
    pub inspections: Vec<InspectionReport>,
}

/// Loaded tables plus the derived data that is computed once per load.
///
/// The consolidated sessions and the compliance projection are memoized at
/// construction; every other metric is derived on request from immutable
/// state. A snapshot is never mutated: a reload builds a new one.
#[derive(Debug, Clone)]
pub struct FleetSnapshot {
    tables: FleetTables,
    consolidated: Table<ConsolidatedRecord>,
    compliance: Table<ComplianceRecord>,
    as_of: NaiveDate,
    loaded_at: DateTime<Utc>,
}

impl FleetSnapshot {
    /// Build a snapshot projecting compliance through the month of `as_of`.
    pub fn build(tables: FleetTables, as_of: NaiveDate) -> Self {
        let consolidated = consolidation::consolidate(&tables.events, &tables.consumption);
        let fleet: HashSet<ShipName> =
            compliance::fleet_vessels(tables.events.iter().map(|e| &e.ship_name));
        let compliance = compliance::project_compliance(
            &tables.coatings,
            &fleet,
            MonthPeriod::of_date(as_of),
        );

        info!(
            "Built fleet snapshot: {} events, {} consolidated sessions, {} compliance records",
            tables.events.len(),
            consolidated.len(),
            compliance.len()
        );

        Self {
            tables,
            consolidated,
            compliance,
            as_of,
            loaded_at: Utc::now(),
        }
    }

    /// Load the configured source files and build a snapshot from them.
    pub fn load(config: &DataConfig, as_of: NaiveDate) -> IngestResult<Self> {
        let tables = ingest::load_tables(config)?;
        Ok(Self::build(tables, as_of))
    }

    pub fn tables(&self) -> &FleetTables {
        &self.tables
    }

    pub fn consolidated(&self) -> &Table<ConsolidatedRecord> {
        &self.consolidated
    }

    pub fn total_vessels(&self) -> usize {
        fleet_metrics::vessel_count(&self.tables.events)
    }

    pub fn navigating_vessels(&self) -> usize {
        fleet_metrics::navigating_vessel_count(&self.tables.events)
    }

    pub fn monthly_consumption(&self) -> Table<MonthlyConsumption> {
        fleet_metrics::monthly_consumption(&self.consolidated)
    }

    pub fn daily_navigation(&self) -> Table<DailyNavigation> {
        fleet_metrics::daily_navigation(&self.tables.events)
    }

    pub fn compliance(&self) -> &Table<ComplianceRecord> {
        &self.compliance
    }

    pub fn biofouling_risk(&self) -> Table<RiskRecord> {
        risk::score_fleet_risk(&self.tables.events, &self.compliance)
    }

    /// Inspection reports with their hard-fouling flag. Not part of the risk score.
    pub fn inspection_flags(&self) -> Table<InspectionReport> {
        Table::new(self.tables.inspections.clone())
    }

    /// Events of one vessel, matched on the trimmed name.
    pub fn vessel_events(&self, ship_name: &str) -> Vec<&Event> {
        let wanted = ShipName::new(ship_name);
        self.tables
            .events
            .iter()
            .filter(|e| e.ship_name == wanted)
            .collect()
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_tables() -> FleetTables {
        let start = date(2024, 1, 5).and_hms_opt(0, 0, 0).unwrap();
        let end = date(2024, 1, 7).and_hms_opt(0, 0, 0).unwrap();
        FleetTables {
            events: vec![Event::new("s1", "A")
                .with_kind(EventKind::Navigating)
                .with_window(start, Some(end))
                .with_duration_hours(48.0)
                .with_position(5.0, Some(-35.0))],
            consumption: vec![ConsumptionRecord::new("s1", Some(100.0))],
            coatings: vec![CoatingApplication::new("A", date(2023, 7, 1), 6.0, 12.0)],
            inspections: vec![InspectionReport::new("A", date(2023, 12, 1), Some("Craca"))],
        }
    }

    #[test]
    fn test_empty_snapshot_is_schema_stable() {
        let snapshot = FleetSnapshot::build(FleetTables::default(), date(2024, 1, 31));
        assert_eq!(snapshot.total_vessels(), 0);
        assert!(snapshot.monthly_consumption().is_empty());
        assert!(snapshot.compliance().is_empty());
        assert_eq!(snapshot.biofouling_risk().columns(), &["ship_name", "month", "risk_level"]);
    }

    #[test]
    fn test_snapshot_projects_through_as_of_month() {
        let snapshot = FleetSnapshot::build(sample_tables(), date(2024, 1, 15));
        let last = snapshot.compliance().rows().last().map(|r| r.month.to_string());
        assert_eq!(last.as_deref(), Some("2024-01"));
        assert_eq!(snapshot.compliance().len(), 7);
        assert_eq!(snapshot.as_of(), date(2024, 1, 15));
    }

    #[test]
    fn test_inspection_flags_and_vessel_events() {
        let snapshot = FleetSnapshot::build(sample_tables(), date(2024, 1, 15));
        assert!(snapshot.inspection_flags().rows()[0].fouling_risk);
        assert_eq!(snapshot.vessel_events(" A ").len(), 1);
        assert!(snapshot.vessel_events("B").is_empty());
    }
}
