//! # Fleet Health Analytics
//!
//! Fleet-health indicators for a maritime fleet, derived from vessel event
//! logs, fuel consumption, hull-coating history and hull inspection reports.
//!
//! ## Features
//!
//! - **Consolidation**: Join events and fuel consumption per voyage session
//! - **Fleet Metrics**: Vessel counts, monthly consumption, daily navigation
//! - **Compliance Projection**: Month-by-month anti-fouling coating compliance
//! - **Risk Scoring**: Monthly biofouling risk level (1-5) per vessel
//! - **Weather Lookup**: Hourly weather history along a vessel's operating area
//! - **HTTP API**: RESTful endpoints for dashboards
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Input records, month periods and schema-stable result tables
//! - [`ingest`]: CSV exports into typed tables with schema validation
//! - [`services`]: The analytical engine and the immutable fleet snapshot
//! - [`config`]: TOML and environment configuration
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use fleet_health::config::DataConfig;
//! use fleet_health::services::FleetSnapshot;
//!
//! let as_of = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
//! let snapshot = FleetSnapshot::load(&DataConfig::in_dir("data"), as_of)?;
//! for record in snapshot.biofouling_risk().iter() {
//!     println!("{} {} -> {}", record.ship_name, record.month, record.risk_level);
//! }
//! # Ok::<(), fleet_health::ingest::IngestError>(())
//! ```

pub mod config;
pub mod ingest;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
