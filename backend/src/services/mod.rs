//! Analytical engine.
//!
//! Pure, synchronous computations over the normalized fleet tables. Nothing
//! in here performs I/O except the optional weather lookup.

pub mod compliance;
pub mod consolidation;
pub mod fleet_metrics;
pub mod risk;
pub mod snapshot;
#[cfg(feature = "weather")]
pub mod weather;

pub use compliance::{project_compliance, ComplianceState};
pub use consolidation::consolidate;
pub use fleet_metrics::{daily_navigation, monthly_consumption, navigating_vessel_count, vessel_count};
pub use risk::{score_fleet_risk, RiskBreakdown};
pub use snapshot::{FleetSnapshot, FleetTables};
#[cfg(feature = "weather")]
pub use weather::{WeatherClient, WeatherError};
