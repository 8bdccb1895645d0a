//! Month-by-month anti-fouling coating compliance projection.
//!
//! Every vessel with at least one coating application gets one record per
//! calendar month, from the month of its earliest application through the
//! projection horizon. Compliance decays linearly from 100% at the application
//! date and reaches 0% once the elapsed time exceeds the tighter of the two
//! regulatory thresholds (`T_base`, `T_max`).

use chrono::NaiveDate;
use log::debug;
use std::collections::{HashMap, HashSet};

use crate::models::{CoatingApplication, ComplianceRecord, MonthPeriod, ShipName, Table};

/// Average length of a calendar month, in days.
pub const AVERAGE_MONTH_DAYS: f64 = 30.437;

/// Coating currently in force for a vessel while walking its months.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComplianceState {
    pub last_application: Option<NaiveDate>,
    pub baseline_months: f64,
    pub max_idle_months: f64,
}

impl ComplianceState {
    /// Adopt `application` if nothing is active yet or it is strictly newer
    /// than the active one. Returns whether the state changed.
    pub fn adopt(&mut self, application: &CoatingApplication) -> bool {
        let newer = match self.last_application {
            None => true,
            Some(active) => application.application_date > active,
        };
        if newer {
            self.last_application = Some(application.application_date);
            self.baseline_months = application.baseline_months;
            self.max_idle_months = application.max_idle_months;
        }
        newer
    }

    /// Compliance percentage at `boundary` (normally the last day of a month).
    pub fn compliance_at(&self, boundary: NaiveDate) -> f64 {
        let Some(applied) = self.last_application else {
            return 0.0;
        };
        let elapsed_days = (boundary - applied).num_days();
        compliance_percent(elapsed_days, self.baseline_months, self.max_idle_months)
    }
}

/// Compliance after `elapsed_days` for a coating with the given thresholds.
///
/// Zero thresholds yield 0%. The result is clamped to `[0, 100]` and rounded
/// to two decimals.
pub fn compliance_percent(elapsed_days: i64, baseline_months: f64, max_idle_months: f64) -> f64 {
    if baseline_months == 0.0 || max_idle_months == 0.0 {
        return 0.0;
    }
    let elapsed_months = elapsed_days as f64 / AVERAGE_MONTH_DAYS;
    let consumed = (elapsed_months / baseline_months).max(elapsed_months / max_idle_months);
    let percent = ((1.0 - consumed).max(0.0) * 100.0).min(100.0);
    round_to_cents(percent)
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Distinct vessels appearing in the event log.
pub fn fleet_vessels<'a, I>(ship_names: I) -> HashSet<ShipName>
where
    I: IntoIterator<Item = &'a ShipName>,
{
    ship_names.into_iter().cloned().collect()
}

/// Project compliance for every coated vessel through `through` inclusive.
///
/// # Arguments
/// * `applications` - Coating history of the whole fleet, any order
/// * `fleet` - Vessels present in the event log; an empty fleet yields no records
/// * `through` - Last month to project (the current month in production)
///
/// # Returns
/// Records ordered by vessel first appearance in `applications`, then by month.
pub fn project_compliance(
    applications: &[CoatingApplication],
    fleet: &HashSet<ShipName>,
    through: MonthPeriod,
) -> Table<ComplianceRecord> {
    if applications.is_empty() || fleet.is_empty() {
        return Table::empty();
    }

    let mut order: Vec<&ShipName> = Vec::new();
    let mut history: HashMap<&ShipName, Vec<&CoatingApplication>> = HashMap::new();
    for application in applications {
        history
            .entry(&application.ship_name)
            .or_insert_with(|| {
                order.push(&application.ship_name);
                Vec::new()
            })
            .push(application);
    }

    let mut rows = Vec::new();
    for ship in order {
        let Some(mut coatings) = history.remove(ship) else {
            continue;
        };
        coatings.sort_by_key(|a| a.application_date);

        if !fleet.contains(ship) {
            debug!("Vessel '{}' has coating history but no recorded events", ship);
        }

        let first_month = MonthPeriod::of_date(coatings[0].application_date);
        let before = rows.len();
        project_vessel(ship, &coatings, first_month, through, &mut rows);
        debug!(
            "Projected {} compliance months for vessel '{}'",
            rows.len() - before,
            ship
        );
    }

    Table::new(rows)
}

/// Walk the months of one vessel, folding the active coating forward.
fn project_vessel(
    ship: &ShipName,
    coatings: &[&CoatingApplication],
    first_month: MonthPeriod,
    through: MonthPeriod,
    out: &mut Vec<ComplianceRecord>,
) {
    let months = first_month.through(through);
    out.extend(months.scan(ComplianceState::default(), |state, month| {
        let boundary = month.last_day();
        let applied = coatings.partition_point(|a| a.application_date <= boundary);
        if let Some(latest) = applied.checked_sub(1).map(|i| coatings[i]) {
            state.adopt(latest);
        }

        Some(ComplianceRecord {
            month,
            ship_name: ship.clone(),
            compliance_percent: state.compliance_at(boundary),
        })
    }));
}

#[cfg(test)]
#[path = "compliance_tests.rs"]
mod tests;
