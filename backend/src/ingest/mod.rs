//! Ingestion adapter: source CSV exports into normalized typed tables.
//!
//! Files are parsed with polars, validated against a per-table schema and
//! converted row by row. Values that cannot be parsed are coerced to absent;
//! only structural problems (unreadable files, missing required columns) are
//! reported as [`IngestError`].

pub mod csv_reader;
pub mod dates;
pub mod error;
pub mod loaders;
pub mod schema;

pub use error::{IngestError, IngestResult};
pub use loaders::{load_coatings, load_consumption, load_events, load_inspections, load_tables};
