//! Dashboard configuration file

use std::path::{Path, PathBuf};

use gm_core::GamesYear;
use gm_core::selection::DEFAULT_COLOR_SEED;
use serde::{Serialize, Deserialize};

use super::null_handling::NullConfig;
use crate::DataError;

/// Placeholder replaced by the Games year in [`DashboardConfig::medal_file_pattern`]
pub const YEAR_PLACEHOLDER: &str = "{year}";

/// Where the data lives and how the dashboard behaves
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory holding the medal CSVs and the geometry file
    pub data_dir: PathBuf,

    /// File name of one year's medal table, `{year}` is substituted
    pub medal_file_pattern: String,

    /// GeoJSON file with country polygons
    pub geometry_file: String,

    /// Games to load
    pub years: Vec<GamesYear>,

    /// Null handling for count cells
    pub null_config: NullConfig,

    /// Countries highlighted when nothing is selected
    pub default_highlight_count: usize,

    /// Seed for selection and series colors
    pub color_seed: u64,

    /// Initial window size in points
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            medal_file_pattern: format!("medals_total_{YEAR_PLACEHOLDER}.csv"),
            geometry_file: "world.geojson".to_string(),
            years: GamesYear::ALL.to_vec(),
            null_config: NullConfig::default(),
            default_highlight_count: 5,
            color_seed: DEFAULT_COLOR_SEED,
            window_size: [1200.0, 800.0],
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        tracing::info!("Loaded dashboard config from {}", path.display());
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, DataError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                tracing::info!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Path of one year's medal table
    pub fn medal_path(&self, year: GamesYear) -> PathBuf {
        self.data_dir
            .join(self.medal_file_pattern.replace(YEAR_PLACEHOLDER, &year.to_string()))
    }

    pub fn geometry_path(&self) -> PathBuf {
        self.data_dir.join(&self.geometry_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = DashboardConfig::default();
        let year = GamesYear::new(2016).unwrap();
        assert_eq!(config.medal_path(year), PathBuf::from("data").join("medals_total_2016.csv"));
        assert_eq!(config.geometry_path(), PathBuf::from("data").join("world.geojson"));
        assert_eq!(config.years.len(), 5);
        assert_eq!(config.default_highlight_count, 5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: DashboardConfig = serde_json::from_str(
            r#"{ "data_dir": "/srv/medals", "years": [2020, 2024], "default_highlight_count": 3 }"#,
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/medals"));
        assert_eq!(config.years, vec![GamesYear::new(2020).unwrap(), GamesYear::LAST]);
        assert_eq!(config.default_highlight_count, 3);
        assert_eq!(config.geometry_file, "world.geojson");
    }

    #[test]
    fn test_untracked_year_is_rejected() {
        let result: Result<DashboardConfig, _> = serde_json::from_str(r#"{ "years": [2010] }"#);
        assert!(result.is_err());
    }
}
