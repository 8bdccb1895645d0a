//! Application configuration.
//!
//! Settings are read from a `fleet.toml` file (every field has a default) and
//! then overridden by environment variables:
//!
//! | Variable                 | Setting               |
//! |--------------------------|-----------------------|
//! | `HOST`                   | `server.host`         |
//! | `PORT`                   | `server.port`         |
//! | `FLEET_DATA_DIR`         | `data.dir`            |
//! | `FLEET_EVENTS_FILE`      | `data.events_file`    |
//! | `FLEET_CONSUMPTION_FILE` | `data.consumption_file` |
//! | `FLEET_COATINGS_FILE`    | `data.coatings_file`  |
//! | `FLEET_INSPECTIONS_FILE` | `data.inspections_file` |
//! | `WEATHER_API_URL`        | `weather.base_url`    |
//!
//! `FLEET_CONFIG` points at an explicit config file.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "FLEET_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub weather: WeatherSettings,
}

/// HTTP server bind settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Location of the four source files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_events_file")]
    pub events_file: String,
    #[serde(default = "default_consumption_file")]
    pub consumption_file: String,
    #[serde(default = "default_coatings_file")]
    pub coatings_file: String,
    #[serde(default = "default_inspections_file")]
    pub inspections_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            events_file: default_events_file(),
            consumption_file: default_consumption_file(),
            coatings_file: default_coatings_file(),
            inspections_file: default_inspections_file(),
        }
    }
}

impl DataConfig {
    /// Config reading all four default file names from `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    pub fn events_path(&self) -> PathBuf {
        self.dir.join(&self.events_file)
    }

    pub fn consumption_path(&self) -> PathBuf {
        self.dir.join(&self.consumption_file)
    }

    pub fn coatings_path(&self) -> PathBuf {
        self.dir.join(&self.coatings_file)
    }

    pub fn inspections_path(&self) -> PathBuf {
        self.dir.join(&self.inspections_file)
    }
}

/// Weather archive client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSettings {
    #[serde(default = "default_weather_url")]
    pub base_url: String,
    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,
    /// Maximum number of days requested per archive call.
    #[serde(default = "default_chunk_days")]
    pub chunk_days: u32,
    /// Earliest date served by the archive; lookups are clamped to it.
    #[serde(default = "default_earliest_date")]
    pub earliest_date: NaiveDate,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            base_url: default_weather_url(),
            timeout_secs: default_weather_timeout(),
            chunk_days: default_chunk_days(),
            earliest_date: default_earliest_date(),
            timezone: default_timezone(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_events_file() -> String {
    "ResultadoQueryEventos.csv".to_string()
}

fn default_consumption_file() -> String {
    "ResultadoQueryConsumo.csv".to_string()
}

fn default_coatings_file() -> String {
    "Dados navios Hackathon.xlsx - Especificacao revestimento.csv".to_string()
}

fn default_inspections_file() -> String {
    "Relatorios IWS.xlsx - Planilha1.csv".to_string()
}

fn default_weather_url() -> String {
    "https://archive-api.open-meteo.com/v1/era5".to_string()
}

fn default_weather_timeout() -> u64 {
    30
}

fn default_chunk_days() -> u32 {
    365
}

fn default_earliest_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn default_timezone() -> String {
    "America/Sao_Paulo".to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Find a config file in the default locations.
    ///
    /// Searches for `fleet.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn default_location() -> Option<PathBuf> {
        [
            PathBuf::from("fleet.toml"),
            PathBuf::from("backend/fleet.toml"),
            PathBuf::from("../fleet.toml"),
        ]
        .into_iter()
        .find(|path| path.exists())
    }

    /// Load the effective configuration: file (if any) plus environment overrides.
    ///
    /// A missing config file is not an error; defaults apply.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .ok()
            .map(PathBuf::from)
            .or_else(Self::default_location);

        let mut config = match path {
            Some(path) => {
                log::info!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => {
                log::info!("No fleet.toml found, using default configuration");
                Self::default()
            }
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("PORT") {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: port,
            })?;
        }
        if let Some(dir) = get("FLEET_DATA_DIR") {
            self.data.dir = PathBuf::from(dir);
        }
        if let Some(file) = get("FLEET_EVENTS_FILE") {
            self.data.events_file = file;
        }
        if let Some(file) = get("FLEET_CONSUMPTION_FILE") {
            self.data.consumption_file = file;
        }
        if let Some(file) = get("FLEET_COATINGS_FILE") {
            self.data.coatings_file = file;
        }
        if let Some(file) = get("FLEET_INSPECTIONS_FILE") {
            self.data.inspections_file = file;
        }
        if let Some(url) = get("WEATHER_API_URL") {
            self.weather.base_url = url;
        }
        Ok(())
    }
}
