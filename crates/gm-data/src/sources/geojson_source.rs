use std::path::PathBuf;

use crate::geometry::WorldGeometry;
use crate::DataError;

/// GeoJSON file of country outlines
pub struct GeoJsonSource {
    path: PathBuf,
}

impl GeoJsonSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read and parse the file on the blocking pool
    pub async fn load(&self) -> Result<WorldGeometry, DataError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let text = std::fs::read_to_string(&path)?;
            WorldGeometry::from_geojson_str(&text)
        })
        .await?
    }

    pub fn source_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.geojson")
    }
}
