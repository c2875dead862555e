//! Medal data loading, storage and aggregation for the dashboard

pub mod aggregate;
pub mod config;
pub mod geometry;
pub mod schema;
pub mod sources;
pub mod store;

use tokio::task::JoinError;
use thiserror::Error;

// Re-exports
pub use aggregate::{AggregateRow, AggregationEngine, CountrySeries, YearPoint};
pub use config::{DashboardConfig, NullConfig};
pub use geometry::{CountryShape, WorldGeometry};
pub use sources::{CsvMedalSource, GeoJsonSource, MedalSource};
pub use store::{CountryEntry, RecordStore, StoreStats};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(String),

    #[error("{source_name}: missing required column '{column}'")]
    MissingColumn { source_name: String, column: String },

    #[error("{source_name} row {row}: invalid value '{value}' in column '{column}'")]
    InvalidValue {
        source_name: String,
        row: usize,
        column: String,
        value: String,
    },

    #[error("duplicate record for {country_code} in {year}")]
    DuplicateRecord { country_code: String, year: u16 },

    #[error("Join error: {0}")]
    Join(#[from] JoinError),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => DataError::Io(std::io::Error::new(io_err.kind(), error.to_string())),
            _ => DataError::Csv(error.to_string()),
        }
    }
}

impl From<geojson::Error> for DataError {
    fn from(error: geojson::Error) -> Self {
        DataError::GeoJson(error.to_string())
    }
}
