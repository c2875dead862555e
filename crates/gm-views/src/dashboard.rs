//! Coordinates the map and the active chart around one shared selection

use std::sync::Arc;

use gm_core::events::events::{ChartTypeChanged, DataLoaded, FiltersChanged, SelectionChanged};
use gm_core::{Category, ChartType, EventBus, FilterState, SelectionState, Toggle, YearFilter};
use gm_data::{RecordStore, WorldGeometry};
use uuid::Uuid;

use crate::plots::{BarChartView, HoverReadout, LinePlotConfig, LinePlotView, MapRender, MapView};
use crate::{RenderInstructions, SpaceView, ViewerContext};

/// Dashboard tuning
#[derive(Debug, Clone, Copy)]
pub struct DashboardOptions {
    /// Countries shown when nothing is selected
    pub highlight_count: usize,

    /// Seed for selection colors; default-set line colors derive from it
    pub color_seed: u64,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            highlight_count: 5,
            color_seed: gm_core::selection::DEFAULT_COLOR_SEED,
        }
    }
}

/// Latest render of every visible view
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub map: MapRender,
    /// Bar or line instructions, whichever chart is active
    pub chart: RenderInstructions,
}

/// Owns the data, filters and selection, and re-renders after every event
pub struct Dashboard {
    store: RecordStore,
    geometry: WorldGeometry,
    filters: FilterState,
    selection: SelectionState,
    highlight_count: usize,

    map: MapView,
    bar: BarChartView,
    line: LinePlotView,

    event_bus: Arc<EventBus>,
    frame: Frame,
}

impl Dashboard {
    pub fn new(store: RecordStore, geometry: WorldGeometry, options: DashboardOptions) -> Self {
        Self::with_event_bus(store, geometry, options, Arc::new(EventBus::new()))
    }

    /// Build the dashboard and render the initial frame. `DataLoaded` is
    /// published here, so only handlers already on `event_bus` receive it.
    pub fn with_event_bus(
        store: RecordStore,
        geometry: WorldGeometry,
        options: DashboardOptions,
        event_bus: Arc<EventBus>,
    ) -> Self {
        let line_config = LinePlotConfig {
            color_seed: options.color_seed.rotate_left(17),
            ..LinePlotConfig::default()
        };

        let map = MapView::new(Uuid::new_v4(), "Medals by Country".to_string());
        let bar = BarChartView::new(Uuid::new_v4(), "Top Countries".to_string());
        let line = LinePlotView::with_config(Uuid::new_v4(), "Medals over Time".to_string(), line_config);

        let filters = FilterState::default();
        let selection = SelectionState::with_seed(options.color_seed);

        let frame = {
            let ctx = ViewerContext {
                store: &store,
                geometry: &geometry,
                filters,
                selection: &selection,
                highlight_count: options.highlight_count,
            };
            Frame {
                map: map.compute(&ctx),
                chart: RenderInstructions::Bar(bar.compute(&ctx)),
            }
        };

        event_bus.publish(DataLoaded {
            record_count: store.len(),
            country_count: store.stats().country_count,
            shape_count: geometry.len(),
        });
        tracing::info!(
            "Dashboard ready with {} records and {} country shapes",
            store.len(),
            geometry.len()
        );

        Self {
            store,
            geometry,
            filters,
            selection,
            highlight_count: options.highlight_count,
            map,
            bar,
            line,
            event_bus,
            frame,
        }
    }

    /// Recompute the map and the active chart
    pub fn refresh(&mut self) {
        let ctx = ViewerContext {
            store: &self.store,
            geometry: &self.geometry,
            filters: self.filters,
            selection: &self.selection,
            highlight_count: self.highlight_count,
        };

        let chart: &mut dyn SpaceView = match self.filters.chart {
            ChartType::Bar => &mut self.bar,
            ChartType::Line => &mut self.line,
        };
        tracing::debug!("Refreshing map and {}", chart.view_type());

        self.frame = Frame {
            map: self.map.compute(&ctx),
            chart: chart.render(&ctx),
        };
    }

    pub fn set_year_filter(&mut self, year: YearFilter) -> bool {
        if self.filters.year == year {
            return false;
        }
        self.filters.year = year;
        self.filters_changed();
        true
    }

    pub fn set_category(&mut self, category: Category) -> bool {
        if self.filters.category == category {
            return false;
        }
        self.filters.category = category;
        self.filters_changed();
        true
    }

    /// Switch the chart beside the map. The selection is kept.
    pub fn set_chart_type(&mut self, chart: ChartType) -> bool {
        if self.filters.chart == chart {
            return false;
        }
        self.filters.chart = chart;
        tracing::info!("Chart switched to {}", chart);
        self.refresh();
        self.event_bus.publish(ChartTypeChanged { chart });
        true
    }

    /// Toggle a country from the map or the country list. Codes that are
    /// neither in the data nor on the map are ignored.
    pub fn toggle_country(&mut self, code: &str) -> Option<Toggle> {
        if !self.store.contains_country(code) && !self.geometry.contains(code) {
            tracing::debug!("Ignoring toggle of unknown country {}", code);
            return None;
        }

        let outcome = self.selection.toggle(code);
        self.selection_changed();
        Some(outcome)
    }

    /// Toggle whichever country contains the clicked longitude/latitude
    pub fn click_map(&mut self, lon: f64, lat: f64) -> Option<Toggle> {
        let code = MapView::country_at(&self.geometry, lon, lat)?.to_string();
        self.toggle_country(&code)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.selection_changed();
    }

    /// Line-chart tooltip for a cursor at a fractional year. Only available
    /// while the line chart is active.
    pub fn line_hover(&self, year: f64) -> Option<HoverReadout> {
        if self.filters.chart != ChartType::Line {
            return None;
        }
        self.line.hover(year)
    }

    /// Line-chart tooltip for a cursor at `fraction` of the plot width
    pub fn line_hover_at(&self, fraction: f64) -> Option<HoverReadout> {
        if self.filters.chart != ChartType::Line {
            return None;
        }
        self.line.hover_at(fraction)
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn filters(&self) -> FilterState {
        self.filters
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn geometry(&self) -> &WorldGeometry {
        &self.geometry
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    fn filters_changed(&mut self) {
        tracing::info!("Filters now {} / {}", self.filters.year, self.filters.category);
        self.refresh();
        self.event_bus.publish(FiltersChanged {
            year: self.filters.year,
            category: self.filters.category,
        });
    }

    fn selection_changed(&mut self) {
        self.refresh();
        self.event_bus.publish(SelectionChanged {
            selected: self.selection.codes().map(str::to_string).collect(),
        });
    }
}
