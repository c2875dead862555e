//! Core types for the medal dashboard
//!
//! This crate holds the medal data model, the shared selection state and
//! the event bus the views use to stay consistent.

pub mod events;
pub mod model;
pub mod selection;
pub mod state;

use thiserror::Error;

// Re-export commonly used types
pub use events::{EventBus, Event, EventHandler, handler_from_fn};
pub use model::{Category, ChartType, GamesYear, MedalCounts, MedalRecord, YearFilter};
pub use selection::{DarkColorGenerator, SelectionEntry, SelectionState, Toggle};
pub use state::FilterState;

/// Errors from parsing the closed enumerations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown medal category: {0}")]
    UnknownCategory(String),

    #[error("not a tracked Games year: {0}")]
    UnknownYear(String),

    #[error("unknown chart type: {0}")]
    UnknownChartType(String),
}
