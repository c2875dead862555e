//! Ranked bar chart implementation

use egui::Color32;
use gm_data::aggregate::rank;

use crate::{RenderInstructions, SpaceView, SpaceViewId, ViewerContext};
use super::utils::colors::STEEL_BLUE;
use super::utils::format::group_thousands;

/// Bar chart configuration
#[derive(Debug, Clone)]
pub struct BarChartConfig {
    /// Fill for every bar
    pub fill: Color32,

    /// Axis label for the country axis
    pub category_label: String,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            fill: STEEL_BLUE,
            category_label: "Country".to_string(),
        }
    }
}

/// One bar, in ranking order
#[derive(Debug, Clone, PartialEq)]
pub struct BarInstruction {
    pub code: String,
    pub name: String,
    pub value: u64,
    /// Bar length relative to the longest bar, `0.0..=1.0`
    pub fraction: f32,
    /// Text drawn at the end of the bar
    pub label: String,
    pub fill: Color32,
}

/// Everything the front-end needs to draw the bar chart
#[derive(Debug, Clone, PartialEq)]
pub struct BarRender {
    /// e.g. "Gold Medals in 2012"
    pub value_label: String,
    pub category_label: String,
    /// Value axis, always starting at zero
    pub x_domain: (u64, u64),
    pub bars: Vec<BarInstruction>,
}

/// Bar chart view
pub struct BarChartView {
    id: SpaceViewId,
    title: String,
    pub config: BarChartConfig,
}

impl BarChartView {
    /// Create a new bar chart view
    pub fn new(id: SpaceViewId, title: String) -> Self {
        Self {
            id,
            title,
            config: BarChartConfig::default(),
        }
    }

    /// Bars for the effective highlight set under the active filter.
    ///
    /// Highlighted countries without a record for the filter get no bar.
    pub fn compute(&self, ctx: &ViewerContext<'_>) -> BarRender {
        let year = ctx.filters.year;
        let highlight = ctx.effective_highlight(year);

        let mut rows = ctx.engine().aggregate(year, ctx.filters.category);
        rows.retain(|row| highlight.iter().any(|code| *code == row.country_code));
        rank(&mut rows);

        // domain is rebuilt from scratch on every render
        let max = rows.iter().map(|row| row.value).max().unwrap_or(0);
        tracing::debug!("Bar chart: {} bars, max {}", rows.len(), max);

        let bars = rows
            .into_iter()
            .map(|row| BarInstruction {
                name: ctx.country_name(&row.country_code),
                fraction: if max == 0 { 0.0 } else { row.value as f32 / max as f32 },
                label: group_thousands(row.value),
                value: row.value,
                code: row.country_code,
                fill: self.config.fill,
            })
            .collect();

        BarRender {
            value_label: ctx.filters.caption(),
            category_label: self.config.category_label.clone(),
            x_domain: (0, max),
            bars,
        }
    }
}

impl SpaceView for BarChartView {
    fn id(&self) -> SpaceViewId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "BarChartView"
    }

    fn render(&mut self, ctx: &ViewerContext<'_>) -> RenderInstructions {
        RenderInstructions::Bar(self.compute(ctx))
    }
}
