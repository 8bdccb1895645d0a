//! Application state for the HTTP server.

use parking_lot::RwLock;
use std::sync::Arc;

use super::error::AppError;
use crate::config::AppConfig;
use crate::services::{FleetSnapshot, WeatherClient, WeatherError};

/// Shared application state passed to all handlers.
///
/// The snapshot slot is only written by a reload; readers clone the inner
/// `Arc` and release the lock immediately.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub weather: Arc<WeatherClient>,
    snapshot: Arc<RwLock<Option<Arc<FleetSnapshot>>>>,
}

impl AppState {
    pub fn new(config: AppConfig, snapshot: Option<FleetSnapshot>) -> Result<Self, WeatherError> {
        let weather = WeatherClient::new(config.weather.clone())?;
        Ok(Self {
            config: Arc::new(config),
            weather: Arc::new(weather),
            snapshot: Arc::new(RwLock::new(snapshot.map(Arc::new))),
        })
    }

    /// Current snapshot, if one has been loaded.
    pub fn snapshot(&self) -> Option<Arc<FleetSnapshot>> {
        self.snapshot.read().clone()
    }

    /// Current snapshot, or 503 when none is loaded.
    pub fn require_snapshot(&self) -> Result<Arc<FleetSnapshot>, AppError> {
        self.snapshot()
            .ok_or_else(|| AppError::Unavailable("Fleet data has not been loaded".to_string()))
    }

    pub fn replace_snapshot(&self, snapshot: FleetSnapshot) -> Arc<FleetSnapshot> {
        let snapshot = Arc::new(snapshot);
        *self.snapshot.write() = Some(Arc::clone(&snapshot));
        snapshot
    }
}
