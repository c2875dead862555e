//! View system for the medal dashboard
//!
//! Views turn aggregates plus the shared selection into render
//! instructions. Drawing those instructions is left to the front-end.

mod dashboard;
mod space_view;
pub mod plots;

pub use dashboard::{Dashboard, DashboardOptions, Frame};
pub use space_view::{RenderInstructions, SpaceView, SpaceViewId};
pub use plots::{BarChartView, BarRender, LinePlotView, LineRender, MapRender, MapView};

use gm_core::{FilterState, SelectionState, YearFilter};
use gm_data::{AggregationEngine, RecordStore, WorldGeometry};

/// Everything a view reads while rendering
#[derive(Clone, Copy)]
pub struct ViewerContext<'a> {
    /// Medal records
    pub store: &'a RecordStore,

    /// Country outlines for the map
    pub geometry: &'a WorldGeometry,

    /// Active year, category and chart
    pub filters: FilterState,

    /// Shared country selection
    pub selection: &'a SelectionState,

    /// Size of the default highlight set
    pub highlight_count: usize,
}

impl<'a> ViewerContext<'a> {
    pub fn engine(&self) -> AggregationEngine<'a> {
        AggregationEngine::new(self.store)
    }

    /// The explicit selection in selection order, or when nothing is
    /// selected the leading countries under `year` and the active category
    pub fn effective_highlight(&self, year: YearFilter) -> Vec<String> {
        if !self.selection.is_empty() {
            return self.selection.codes().map(str::to_string).collect();
        }
        self.engine()
            .top_codes(year, self.filters.category, self.highlight_count)
    }

    /// Display name for a code, falling back to the code itself
    pub fn country_name(&self, code: &str) -> String {
        self.store
            .country_name(code)
            .or_else(|| self.geometry.get(code).and_then(|s| s.name.as_deref()))
            .unwrap_or(code)
            .to_string()
    }
}
