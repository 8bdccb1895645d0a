use super::*;
use crate::models::EventKind;
use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn port_call(session: &str, ship: &str, start: NaiveDateTime, hours: f64, lat: f64) -> Event {
    Event::new(session, ship)
        .with_kind(EventKind::InPort)
        .with_window(start, None)
        .with_duration_hours(hours)
        .with_position(lat, None)
}

fn voyage(session: &str, ship: &str, start: NaiveDateTime, lat: f64) -> Event {
    Event::new(session, ship)
        .with_kind(EventKind::Navigating)
        .with_window(start, None)
        .with_position(lat, Some(-40.0))
}

fn compliance(ship: &str, y: i32, m: u32, percent: f64) -> ComplianceRecord {
    ComplianceRecord {
        month: MonthPeriod::new(y, m).unwrap(),
        ship_name: ShipName::new(ship),
        compliance_percent: percent,
    }
}

#[test]
fn test_boundary_ties_resolve_to_lower_bucket() {
    assert_eq!(latitude_score(20.0), 1.0);
    assert_eq!(latitude_score(19.999), 2.5);
    assert_eq!(exposure_score(10.0), 0.5);
    assert_eq!(exposure_score(3.0), 0.0);
    assert_eq!(exposure_score(10.01), 1.5);
    assert_eq!(coating_score(75.0), 0.0);
    assert_eq!(coating_score(25.0), 0.5);
    assert_eq!(coating_score(24.99), 1.0);
}

#[test]
fn test_risk_level_clamps_then_rounds_half_up() {
    assert_eq!(risk_level(1.0), 1);
    assert_eq!(risk_level(3.5), 4);
    assert_eq!(risk_level(2.5), 3);
    assert_eq!(risk_level(1.5), 2);
    assert_eq!(risk_level(0.0), 1);
    assert_eq!(risk_level(7.0), 5);
}

#[test]
fn test_exposure_aggregates_per_month() {
    let events = vec![
        voyage("1", "A", at(2024, 1, 2), -10.0),
        port_call("2", "A", at(2024, 1, 20), 48.0, 30.0),
        port_call("3", "A", at(2024, 2, 1), 100.0, 30.0),
    ];
    let grouped = monthly_exposure(&events);
    assert_eq!(grouped.len(), 1);

    let (ship, months) = &grouped[0];
    assert_eq!(ship.as_str(), "A");
    let january = months[&MonthPeriod::new(2024, 1).unwrap()];
    assert_eq!(january.mean_abs_latitude(), 20.0);
    assert_eq!(january.port_days(), 2.0);
}

#[test]
fn test_ineligible_events_are_skipped() {
    let events = vec![
        Event::new("1", "A")
            .with_kind(EventKind::InPort)
            .with_window(at(2024, 1, 1), None),
        Event::new("2", "B").with_position(5.0, None),
        Event::new("3", "C")
            .with_window(at(2024, 1, 1), None)
            .with_position(5.0, None),
    ];
    let risk = score_fleet_risk(&events, &Table::empty());
    assert!(risk.is_empty());
    assert_eq!(risk.columns(), &["ship_name", "month", "risk_level"]);
}

#[test]
fn test_vessels_ordered_by_first_appearance_in_events() {
    let events = vec![
        Event::new("1", "A")
            .with_kind(EventKind::Navigating)
            .with_window(at(2024, 1, 1), None),
        voyage("2", "B", at(2024, 1, 2), 45.0),
        voyage("3", "A", at(2024, 1, 3), 45.0),
        Event::new("4", "C").with_position(5.0, None),
    ];

    let ships: Vec<String> = monthly_exposure(&events)
        .into_iter()
        .map(|(ship, _)| ship.to_string())
        .collect();
    assert_eq!(ships, vec!["A", "B"]);

    let risk = score_fleet_risk(&events, &Table::empty());
    let ships: Vec<&str> = risk.iter().map(|r| r.ship_name.as_str()).collect();
    assert_eq!(ships, vec!["A", "B"]);
}

#[test]
fn test_missing_port_duration_counts_as_zero() {
    let events = vec![Event::new("1", "A")
        .with_kind(EventKind::InPort)
        .with_window(at(2024, 1, 1), None)
        .with_position(45.0, None)];
    let risk = score_fleet_risk(&events, &Table::empty());
    assert_eq!(risk.rows()[0].risk_level, 1);
}

#[test]
fn test_compliance_lookup_and_default() {
    let events = vec![
        voyage("1", "A", at(2024, 1, 5), 5.0),
        voyage("2", "A", at(2024, 2, 5), 5.0),
        voyage("3", "B", at(2024, 1, 5), 45.0),
    ];
    let table: Table<ComplianceRecord> = vec![compliance("A", 2024, 1, 10.0)].into_iter().collect();

    let risk = score_fleet_risk(&events, &table);
    let levels: Vec<(String, String, u8)> = risk
        .iter()
        .map(|r| (r.ship_name.to_string(), r.month.to_string(), r.risk_level))
        .collect();
    assert_eq!(
        levels,
        vec![
            ("A".to_string(), "2024-01".to_string(), 4),
            ("A".to_string(), "2024-02".to_string(), 3),
            ("B".to_string(), "2024-01".to_string(), 1),
        ]
    );
}

#[test]
fn test_long_port_stay_in_tropics_saturates() {
    let events = vec![port_call("1", "A", at(2024, 3, 1), 24.0 * 12.0, -3.0)];
    let table: Table<ComplianceRecord> = vec![compliance("A", 2024, 3, 0.0)].into_iter().collect();
    let risk = score_fleet_risk(&events, &table);
    assert_eq!(risk.rows()[0].risk_level, 5);
}

proptest! {
    #[test]
    fn prop_risk_level_stays_in_bounds(
        lat in -90.0f64..90.0,
        port_hours in 0.0f64..2_000.0,
        percent in 0.0f64..=100.0,
    ) {
        let events = vec![port_call("1", "A", at(2024, 5, 1), port_hours, lat)];
        let table: Table<ComplianceRecord> =
            vec![compliance("A", 2024, 5, percent)].into_iter().collect();
        let risk = score_fleet_risk(&events, &table);
        prop_assert_eq!(risk.len(), 1);
        let level = risk.rows()[0].risk_level;
        prop_assert!((MIN_RISK_LEVEL..=MAX_RISK_LEVEL).contains(&level));
    }

    #[test]
    fn prop_risk_level_of_any_total_is_bounded(total in -100.0f64..100.0) {
        let level = risk_level(total);
        prop_assert!((1..=5).contains(&level));
    }
}
