//! Error types for the ingestion layer.

use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning source files into typed tables.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("Table '{table}' is missing required columns: {}", missing.join(", "))]
    Schema {
        table: &'static str,
        missing: Vec<String>,
    },
}

impl IngestError {
    pub fn is_schema(&self) -> bool {
        matches!(self, IngestError::Schema { .. })
    }
}

pub type IngestResult<T> = Result<T, IngestError>;
