//! HTTP handlers for the REST API.
//!
//! Metric handlers read from the current snapshot; table-shaped metrics are
//! computed on the blocking pool.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use log::info;
use std::sync::Arc;

use super::dto::{CountResponse, HealthResponse, MetricTable, ReloadResponse, WeatherResponse};
use super::error::AppError;
use super::state::AppState;
use crate::models::{
    ComplianceRecord, DailyNavigation, InspectionReport, MonthlyConsumption, RiskRecord, Table,
    TableRow,
};
use crate::services::FleetSnapshot;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Run a snapshot computation on the blocking pool and wrap it as a metric table.
async fn table_metric<T, F>(state: &AppState, metric: &str, compute: F) -> HandlerResult<MetricTable<T>>
where
    T: TableRow + Send + 'static,
    F: FnOnce(&FleetSnapshot) -> Table<T> + Send + 'static,
{
    let snapshot = state.require_snapshot()?;
    let data = tokio::task::spawn_blocking(move || compute(snapshot.as_ref())).await?;
    Ok(Json(MetricTable::new(metric, data)))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let data = if state.snapshot().is_some() {
        "loaded"
    } else {
        "unavailable"
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        data: data.to_string(),
    }))
}

// =============================================================================
// Fleet Metrics
// =============================================================================

/// GET /v1/metrics/vessels/total
pub async fn total_vessels(State(state): State<AppState>) -> HandlerResult<CountResponse> {
    let snapshot = state.require_snapshot()?;
    Ok(Json(CountResponse {
        metric: "total_vessels".to_string(),
        value: snapshot.total_vessels(),
    }))
}

/// GET /v1/metrics/vessels/navigating
///
/// Vessels with at least one navigating event in the loaded data.
pub async fn navigating_vessels(State(state): State<AppState>) -> HandlerResult<CountResponse> {
    let snapshot = state.require_snapshot()?;
    Ok(Json(CountResponse {
        metric: "navigating_vessels".to_string(),
        value: snapshot.navigating_vessels(),
    }))
}

/// GET /v1/metrics/consumption/monthly
pub async fn monthly_consumption(
    State(state): State<AppState>,
) -> HandlerResult<MetricTable<MonthlyConsumption>> {
    table_metric(&state, "monthly_consumption", |s| s.monthly_consumption()).await
}

/// GET /v1/metrics/navigation/daily
pub async fn daily_navigation(
    State(state): State<AppState>,
) -> HandlerResult<MetricTable<DailyNavigation>> {
    table_metric(&state, "daily_navigation", |s| s.daily_navigation()).await
}

/// GET /v1/metrics/compliance
pub async fn compliance(State(state): State<AppState>) -> HandlerResult<MetricTable<ComplianceRecord>> {
    table_metric(&state, "coating_compliance", |s| s.compliance().clone()).await
}

/// GET /v1/metrics/biofouling-risk
pub async fn biofouling_risk(State(state): State<AppState>) -> HandlerResult<MetricTable<RiskRecord>> {
    table_metric(&state, "biofouling_risk", |s| s.biofouling_risk()).await
}

/// GET /v1/metrics/inspections
///
/// Inspection reports with their hard-fouling flag (informational only).
pub async fn inspections(
    State(state): State<AppState>,
) -> HandlerResult<MetricTable<InspectionReport>> {
    table_metric(&state, "inspection_flags", |s| s.inspection_flags()).await
}

// =============================================================================
// Weather
// =============================================================================

/// GET /v1/weather/{ship_name}
///
/// Hourly weather history at the vessel's first recorded position.
pub async fn vessel_weather(
    State(state): State<AppState>,
    Path(ship_name): Path<String>,
) -> HandlerResult<WeatherResponse> {
    let snapshot = state.require_snapshot()?;
    let events = snapshot.vessel_events(&ship_name);
    if events.is_empty() {
        return Err(AppError::NotFound(format!("Vessel '{}' not found", ship_name.trim())));
    }

    let observations = state.weather.vessel_weather(&events).await;
    if observations.is_empty() {
        return Err(AppError::NotFound(format!(
            "No weather data available for vessel '{}'",
            ship_name.trim()
        )));
    }

    Ok(Json(WeatherResponse {
        ship_name: ship_name.trim().to_string(),
        observations,
    }))
}

// =============================================================================
// Reload
// =============================================================================

/// POST /v1/reload
///
/// Rebuild the snapshot from the configured source files.
pub async fn reload(State(state): State<AppState>) -> HandlerResult<ReloadResponse> {
    let data_config = state.config.data.clone();
    let as_of = Utc::now().date_naive();

    let snapshot =
        tokio::task::spawn_blocking(move || FleetSnapshot::load(&data_config, as_of)).await??;
    let snapshot: Arc<FleetSnapshot> = state.replace_snapshot(snapshot);
    info!("Fleet snapshot reloaded at {}", snapshot.loaded_at());

    Ok(Json(ReloadResponse {
        status: "reloaded".to_string(),
        as_of: snapshot.as_of(),
        loaded_at: snapshot.loaded_at(),
        total_vessels: snapshot.total_vessels(),
        compliance_records: snapshot.compliance().len(),
    }))
}
