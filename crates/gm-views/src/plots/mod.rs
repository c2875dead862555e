//! Plot view implementations

pub mod bar;
pub mod map;
pub mod line;

// Utilities
pub mod utils;

// Re-exports
pub use bar::{BarChartView, BarChartConfig, BarInstruction, BarRender};
pub use map::{CountryListItem, MapConfig, MapCountry, MapLegend, MapRender, MapView};
pub use line::{HoverEntry, HoverReadout, LinePlotConfig, LinePlotView, LineRender, LineSeries, TimeAxis};

#[cfg(test)]
pub(crate) mod test_support {
    use geo::{LineString, MultiPolygon, Polygon};
    use gm_core::{FilterState, GamesYear, MedalCounts, MedalRecord, SelectionState};
    use gm_data::{CountryShape, RecordStore, WorldGeometry};

    use crate::ViewerContext;

    pub struct Fixture {
        pub store: RecordStore,
        pub geometry: WorldGeometry,
    }

    impl Fixture {
        pub fn context<'a>(&'a self, filters: FilterState, selection: &'a SelectionState) -> ViewerContext<'a> {
            ViewerContext {
                store: &self.store,
                geometry: &self.geometry,
                filters,
                selection,
                highlight_count: 5,
            }
        }
    }

    pub fn square(id: &str, lon: f64, lat: f64, size: f64) -> CountryShape {
        let ring = LineString::from(vec![
            (lon, lat),
            (lon + size, lat),
            (lon + size, lat + size),
            (lon, lat + size),
            (lon, lat),
        ]);
        CountryShape {
            id: id.to_string(),
            name: None,
            shape: MultiPolygon(vec![Polygon::new(ring, vec![])]),
        }
    }

    pub fn record(code: &str, name: &str, year: u16, gold: u32, silver: u32, bronze: u32) -> MedalRecord {
        MedalRecord::new(code, name, GamesYear::new(year).unwrap(), MedalCounts::new(gold, silver, bronze))
    }

    /// Totals over all years: USA 236, CHN 192, GBR 63, FRA 30.
    /// Gold over all years: CHN 89, USA 76, GBR 20, FRA 8. Nothing in 2016.
    /// GBR has no outline and ATA has no medals.
    pub fn fixture() -> Fixture {
        let store = RecordStore::from_records(vec![
            record("USA", "United States", 2008, 36, 38, 36),
            record("USA", "United States", 2024, 40, 44, 42),
            record("CHN", "China", 2008, 48, 22, 30),
            record("CHN", "China", 2024, 41, 27, 24),
            record("FRA", "France", 2012, 8, 9, 13),
            record("GBR", "Great Britain", 2020, 20, 21, 22),
        ])
        .unwrap();

        let geometry = WorldGeometry::new(vec![
            square("USA", -120.0, 30.0, 20.0),
            square("CHN", 80.0, 20.0, 20.0),
            square("FRA", 0.0, 43.0, 6.0),
            square("ATA", -60.0, -85.0, 20.0),
        ]);

        Fixture { store, geometry }
    }
}
