//! Utilities for plot views

pub mod colors;
pub mod format;

// Re-export commonly used items
pub use colors::{QuantizeScale, MAP_PALETTE, STEEL_BLUE};
pub use format::{format_value, group_thousands};
