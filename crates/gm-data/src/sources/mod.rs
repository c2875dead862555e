//! Startup data sources

pub mod csv_source;
pub mod geojson_source;

pub use csv_source::CsvMedalSource;
pub use geojson_source::GeoJsonSource;

use gm_core::MedalRecord;

/// Anything that can produce medal records once at startup
#[async_trait::async_trait]
pub trait MedalSource: Send + Sync {
    /// Read every record this source holds
    async fn load(&self) -> anyhow::Result<Vec<MedalRecord>>;

    /// Get the source name/path
    fn source_name(&self) -> &str;
}
