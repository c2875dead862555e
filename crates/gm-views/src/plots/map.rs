//! Choropleth map of medal counts

use ahash::AHashMap;
use egui::Color32;
use geo::{Contains, Point};
use gm_data::aggregate::value_extent;
use gm_data::WorldGeometry;

use crate::{RenderInstructions, SpaceView, SpaceViewId, ViewerContext};
use super::utils::colors::{QuantizeScale, MAP_PALETTE};

/// Map configuration
#[derive(Debug, Clone)]
pub struct MapConfig {
    /// Bucket colors, light to dark
    pub palette: Vec<Color32>,

    /// Palette indices shown in the gradient legend
    pub legend_stops: Vec<usize>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            palette: MAP_PALETTE.to_vec(),
            legend_stops: vec![0, 2, 5, 7],
        }
    }
}

/// One country as drawn on the map
#[derive(Debug, Clone, PartialEq)]
pub struct MapCountry {
    pub code: String,
    pub name: String,
    /// Aggregate for the active filter, 0 without data
    pub value: u64,
    pub has_data: bool,
    pub bucket: usize,
    pub fill: Color32,
    pub selected: bool,
}

/// Gradient legend under the map
#[derive(Debug, Clone, PartialEq)]
pub struct MapLegend {
    pub min: u64,
    pub max: u64,
    /// Offset in `0.0..=1.0` and color of each gradient stop
    pub stops: Vec<(f32, Color32)>,
}

/// Entry in the alphabetical country list beside the map
#[derive(Debug, Clone, PartialEq)]
pub struct CountryListItem {
    pub code: String,
    pub name: String,
    pub selected: bool,
    pub color: Option<Color32>,
}

/// Everything the front-end needs to draw the map panel
#[derive(Debug, Clone, PartialEq)]
pub struct MapRender {
    /// `[min, max]` of the filtered aggregate, `None` when it is empty
    pub domain: Option<(u64, u64)>,
    pub countries: Vec<MapCountry>,
    pub legend: MapLegend,
    pub country_list: Vec<CountryListItem>,
    /// Codes with medal data but no outline
    pub unmatched: Vec<String>,
}

/// Map view
pub struct MapView {
    id: SpaceViewId,
    title: String,
    pub config: MapConfig,
}

impl MapView {
    pub fn new(id: SpaceViewId, title: String) -> Self {
        Self {
            id,
            title,
            config: MapConfig::default(),
        }
    }

    /// Compute the map for the active year and category
    pub fn compute(&self, ctx: &ViewerContext<'_>) -> MapRender {
        let rows = ctx
            .engine()
            .aggregate(ctx.filters.year, ctx.filters.category);
        let domain = value_extent(&rows);
        let scale = domain.map(|(min, max)| QuantizeScale::new((min as f64, max as f64), &self.config.palette));

        let values: AHashMap<&str, u64> = rows
            .iter()
            .map(|row| (row.country_code.as_str(), row.value))
            .collect();

        let countries: Vec<MapCountry> = ctx
            .geometry
            .shapes()
            .iter()
            .map(|shape| {
                let value = values.get(shape.id.as_str()).copied();
                let shown = value.unwrap_or(0);
                let bucket = scale.as_ref().map(|s| s.bucket(shown as f64)).unwrap_or(0);
                MapCountry {
                    code: shape.id.clone(),
                    name: ctx.country_name(&shape.id),
                    value: shown,
                    has_data: value.is_some(),
                    bucket,
                    fill: self.palette_color(bucket),
                    selected: ctx.selection.contains(&shape.id),
                }
            })
            .collect();

        let unmatched: Vec<String> = rows
            .iter()
            .filter(|row| !ctx.geometry.contains(&row.country_code))
            .map(|row| row.country_code.clone())
            .collect();
        if !unmatched.is_empty() {
            tracing::debug!("{} countries have medals but no outline: {:?}", unmatched.len(), unmatched);
        }

        let (min, max) = domain.unwrap_or((0, 0));
        let last_stop = self.config.legend_stops.len().saturating_sub(1).max(1) as f32;
        let legend = MapLegend {
            min,
            max,
            stops: self
                .config
                .legend_stops
                .iter()
                .enumerate()
                .map(|(i, &idx)| (i as f32 / last_stop, self.palette_color(idx)))
                .collect(),
        };

        let country_list = ctx
            .store
            .countries()
            .into_iter()
            .map(|entry| CountryListItem {
                selected: ctx.selection.contains(&entry.code),
                color: ctx.selection.color_of(&entry.code),
                code: entry.code,
                name: entry.name,
            })
            .collect();

        MapRender {
            domain,
            countries,
            legend,
            country_list,
            unmatched,
        }
    }

    /// Palette entry, transparent for an index the palette does not have
    fn palette_color(&self, index: usize) -> Color32 {
        self.config
            .palette
            .get(index)
            .copied()
            .unwrap_or(Color32::TRANSPARENT)
    }

    /// Country whose outline contains the given longitude/latitude
    pub fn country_at<'g>(geometry: &'g WorldGeometry, lon: f64, lat: f64) -> Option<&'g str> {
        let point = Point::new(lon, lat);
        geometry
            .shapes()
            .iter()
            .find(|shape| shape.shape.contains(&point))
            .map(|shape| shape.id.as_str())
    }
}

impl SpaceView for MapView {
    fn id(&self) -> SpaceViewId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "MapView"
    }

    fn render(&mut self, ctx: &ViewerContext<'_>) -> RenderInstructions {
        RenderInstructions::Map(self.compute(ctx))
    }
}
