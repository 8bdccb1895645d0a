//! HTTP server module for the fleet analytics engine.
//!
//! Exposes the metrics of the current [`FleetSnapshot`](crate::services::FleetSnapshot)
//! as a small JSON REST API.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - JSON serialization                                     │
//! │  - CORS, compression, tracing, error mapping              │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  FleetSnapshot (services/)                                │
//! │  - Consolidation, metrics, compliance, risk               │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Ingestion (ingest/)                                      │
//! │  - CSV exports into typed tables                          │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
