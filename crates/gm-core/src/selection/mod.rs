//! Shared country selection
//!
//! The dashboard owns one [`SelectionState`]; every view reads it and only
//! [`SelectionState::toggle`] and [`SelectionState::clear`] mutate it.

mod colors;

pub use colors::{DarkColorGenerator, DARK_CHANNEL_MAX};

use egui::Color32;
use indexmap::IndexMap;

/// Default seed for the selection color sequence
pub const DEFAULT_COLOR_SEED: u64 = 0x6d65_6461_6c73;

/// A selected country and the color it was given
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    pub country_code: String,
    pub color: Color32,
}

/// Outcome of a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Selected(Color32),
    Deselected,
}

/// Set of selected countries in insertion order
pub struct SelectionState {
    entries: IndexMap<String, Color32>,
    colors: DarkColorGenerator,
}

impl SelectionState {
    /// Create an empty selection with the default color seed
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_COLOR_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            entries: IndexMap::new(),
            colors: DarkColorGenerator::new(seed),
        }
    }

    /// Select the country if absent, deselect it otherwise.
    ///
    /// Deselecting drops the color; selecting again later draws a new one.
    pub fn toggle(&mut self, country_code: &str) -> Toggle {
        if self.entries.shift_remove(country_code).is_some() {
            tracing::debug!("Deselected {}", country_code);
            return Toggle::Deselected;
        }

        let color = self.next_color();
        self.entries.insert(country_code.to_string(), color);
        tracing::debug!("Selected {} with color {:?}", country_code, color);
        Toggle::Selected(color)
    }

    /// Draw a dark color not held by any currently selected country, when
    /// the generator manages that within its retry budget
    pub fn next_color(&mut self) -> Color32 {
        let entries = &self.entries;
        self.colors.next_avoiding(|c| entries.values().any(|used| *used == c))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, country_code: &str) -> bool {
        self.entries.contains_key(country_code)
    }

    pub fn color_of(&self, country_code: &str) -> Option<Color32> {
        self.entries.get(country_code).copied()
    }

    /// Selected codes in the order they were selected
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Read-only copy of the current selection
    pub fn snapshot(&self) -> Vec<SelectionEntry> {
        self.entries
            .iter()
            .map(|(code, color)| SelectionEntry {
                country_code: code.clone(),
                color: *color,
            })
            .collect()
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}
