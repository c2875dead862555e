//! Line chart of medal counts per Games

use ahash::AHashMap;
use egui::Color32;
use gm_core::{DarkColorGenerator, GamesYear, YearFilter};
use gm_data::YearPoint;

use crate::{RenderInstructions, SpaceView, SpaceViewId, ViewerContext};
use super::utils::format::format_value;

/// Horizontal axis of the line chart, fixed to the tracked Games
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeAxis {
    pub start: GamesYear,
    pub end: GamesYear,
}

impl Default for TimeAxis {
    fn default() -> Self {
        Self {
            start: GamesYear::FIRST,
            end: GamesYear::LAST,
        }
    }
}

impl TimeAxis {
    /// Fractional year under a cursor at `fraction` of the plot width,
    /// clamped to the axis
    pub fn invert(&self, fraction: f64) -> f64 {
        let start = f64::from(self.start.get());
        let end = f64::from(self.end.get());
        start + fraction.clamp(0.0, 1.0) * (end - start)
    }

    /// Games whose tooltip a cursor at `fraction` shows
    pub fn year_at(&self, fraction: f64) -> GamesYear {
        GamesYear::snap(self.invert(fraction))
    }

    pub fn ticks(&self) -> Vec<GamesYear> {
        GamesYear::ALL
            .into_iter()
            .filter(|y| *y >= self.start && *y <= self.end)
            .collect()
    }
}

/// Configuration for line plot view
#[derive(Debug, Clone)]
pub struct LinePlotConfig {
    pub axis: TimeAxis,

    /// Line width in points
    pub line_width: f32,

    /// Seed for colors of countries shown by default
    pub color_seed: u64,
}

impl Default for LinePlotConfig {
    fn default() -> Self {
        Self {
            axis: TimeAxis::default(),
            line_width: 2.0,
            color_seed: 0x6c69_6e65,
        }
    }
}

/// One country's line
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub code: String,
    pub name: String,
    pub color: Color32,
    /// Ascending by year
    pub points: Vec<YearPoint>,
}

/// Everything the front-end needs to draw the line chart
#[derive(Debug, Clone, PartialEq)]
pub struct LineRender {
    pub y_label: String,
    pub x_domain: (GamesYear, GamesYear),
    pub y_domain: (u64, u64),
    pub ticks: Vec<GamesYear>,
    pub line_width: f32,
    pub series: Vec<LineSeries>,
}

/// One row of the hover tooltip
#[derive(Debug, Clone, PartialEq)]
pub struct HoverEntry {
    pub code: String,
    pub name: String,
    pub value: u64,
    pub formatted: String,
    pub color: Color32,
}

/// Tooltip for the Games under the cursor
#[derive(Debug, Clone, PartialEq)]
pub struct HoverReadout {
    pub year: GamesYear,
    /// Largest value first
    pub entries: Vec<HoverEntry>,
}

/// Line plot view
pub struct LinePlotView {
    id: SpaceViewId,
    title: String,
    pub config: LinePlotConfig,

    // State
    default_colors: AHashMap<String, Color32>,
    color_generator: DarkColorGenerator,
    last_render: Option<LineRender>,
}

impl LinePlotView {
    pub fn new(id: SpaceViewId, title: String) -> Self {
        Self::with_config(id, title, LinePlotConfig::default())
    }

    pub fn with_config(id: SpaceViewId, title: String, config: LinePlotConfig) -> Self {
        Self {
            id,
            title,
            color_generator: DarkColorGenerator::new(config.color_seed),
            config,
            default_colors: AHashMap::new(),
            last_render: None,
        }
    }

    /// Per-year lines for the effective highlight set.
    ///
    /// The year filter does not apply here; the default set is ranked over
    /// all Games.
    pub fn compute(&mut self, ctx: &ViewerContext<'_>) -> LineRender {
        let highlight = ctx.effective_highlight(YearFilter::All);
        let codes: Vec<&str> = highlight.iter().map(String::as_str).collect();
        let series_data = ctx.engine().aggregate_by_year(ctx.filters.category, &codes);

        let series: Vec<LineSeries> = series_data
            .into_iter()
            .map(|series| LineSeries {
                color: self.color_for(ctx, &series.country_code),
                code: series.country_code,
                name: series.country_name,
                points: series.points,
            })
            .collect();

        let max = series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.value))
            .max()
            .unwrap_or(0);
        tracing::debug!("Line chart: {} series, max {}", series.len(), max);

        let render = LineRender {
            y_label: ctx.filters.category.label(),
            x_domain: (self.config.axis.start, self.config.axis.end),
            y_domain: (0, max),
            ticks: self.config.axis.ticks(),
            line_width: self.config.line_width,
            series,
        };
        self.last_render = Some(render.clone());
        render
    }

    /// Selected countries use their selection color; others keep the color
    /// this view first gave them
    fn color_for(&mut self, ctx: &ViewerContext<'_>, code: &str) -> Color32 {
        if let Some(color) = ctx.selection.color_of(code) {
            return color;
        }
        if let Some(color) = self.default_colors.get(code) {
            return *color;
        }

        let used = &self.default_colors;
        let color = self
            .color_generator
            .next_avoiding(|c| used.values().any(|u| *u == c));
        self.default_colors.insert(code.to_string(), color);
        color
    }

    /// Tooltip for a cursor at a (fractional) year, from the last render
    pub fn hover(&self, year: f64) -> Option<HoverReadout> {
        let render = self.last_render.as_ref()?;
        let year = GamesYear::snap(year);

        let mut entries: Vec<HoverEntry> = render
            .series
            .iter()
            .filter_map(|series| {
                let point = series.points.iter().find(|p| p.year == year)?;
                Some(HoverEntry {
                    code: series.code.clone(),
                    name: series.name.clone(),
                    value: point.value,
                    formatted: format_value(point.value),
                    color: series.color,
                })
            })
            .collect();
        entries.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.code.cmp(&b.code)));

        Some(HoverReadout { year, entries })
    }

    /// Tooltip for a cursor at `fraction` of the plot width
    pub fn hover_at(&self, fraction: f64) -> Option<HoverReadout> {
        self.hover(self.config.axis.invert(fraction))
    }
}

impl SpaceView for LinePlotView {
    fn id(&self) -> SpaceViewId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "LinePlotView"
    }

    fn render(&mut self, ctx: &ViewerContext<'_>) -> RenderInstructions {
        RenderInstructions::Line(self.compute(ctx))
    }
}
