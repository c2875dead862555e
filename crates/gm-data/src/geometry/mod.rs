//! Country outlines keyed by the same codes as the medal data

use ahash::AHashMap;
use geo_types::MultiPolygon;
use geojson::{feature::Id, Feature, GeoJson};

use crate::DataError;

/// Outline of one country
#[derive(Debug, Clone)]
pub struct CountryShape {
    /// Country code, matches `MedalRecord::country_code`
    pub id: String,
    pub name: Option<String>,
    /// Longitude/latitude polygons
    pub shape: MultiPolygon<f64>,
}

/// Every country outline the map draws
#[derive(Debug, Clone, Default)]
pub struct WorldGeometry {
    shapes: Vec<CountryShape>,
    by_id: AHashMap<String, usize>,
}

impl WorldGeometry {
    pub fn new(shapes: Vec<CountryShape>) -> Self {
        let mut by_id = AHashMap::with_capacity(shapes.len());
        for (idx, shape) in shapes.iter().enumerate() {
            if by_id.insert(shape.id.clone(), idx).is_some() {
                tracing::warn!("Duplicate geometry for {}, keeping the last one", shape.id);
            }
        }
        Self { shapes, by_id }
    }

    /// Parse a GeoJSON document. Only features with an id and a polygonal
    /// geometry are kept.
    pub fn from_geojson_str(text: &str) -> Result<Self, DataError> {
        let geojson: GeoJson = text.parse()?;
        let features = match geojson {
            GeoJson::FeatureCollection(collection) => collection.features,
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::Geometry(_) => {
                return Err(DataError::GeoJson("expected a FeatureCollection, found a bare geometry".to_string()));
            }
        };

        let mut shapes = Vec::with_capacity(features.len());
        for feature in features {
            if let Some(shape) = shape_from_feature(feature)? {
                shapes.push(shape);
            }
        }

        tracing::info!("Loaded {} country shapes", shapes.len());
        Ok(Self::new(shapes))
    }

    pub fn shapes(&self) -> &[CountryShape] {
        &self.shapes
    }

    pub fn get(&self, id: &str) -> Option<&CountryShape> {
        self.by_id.get(id).map(|&idx| &self.shapes[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

fn shape_from_feature(feature: Feature) -> Result<Option<CountryShape>, DataError> {
    let property = |key: &str| {
        feature
            .properties
            .as_ref()
            .and_then(|props| props.get(key))
            .and_then(|value| value.as_str())
            .map(str::to_string)
    };

    let id = match &feature.id {
        Some(Id::String(id)) => Some(id.clone()),
        Some(Id::Number(number)) => Some(number.to_string()),
        None => property("id"),
    };
    let Some(id) = id else {
        tracing::warn!("Skipping feature without an id");
        return Ok(None);
    };
    let name = property("name");

    let Some(geometry) = feature.geometry else {
        tracing::warn!("Skipping {}: no geometry", id);
        return Ok(None);
    };

    let shape = match geo_types::Geometry::<f64>::try_from(geometry)? {
        geo_types::Geometry::Polygon(polygon) => MultiPolygon(vec![polygon]),
        geo_types::Geometry::MultiPolygon(multi) => multi,
        _ => {
            tracing::warn!("Skipping {}: not a polygon", id);
            return Ok(None);
        }
    };

    Ok(Some(CountryShape { id, name, shape }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SQUARES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": "FRA",
                "properties": { "name": "France" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 40.0], [10.0, 40.0], [10.0, 50.0], [0.0, 50.0], [0.0, 40.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "id": "ESP", "name": "Spain" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [[[[-10.0, 35.0], [0.0, 35.0], [0.0, 40.0], [-10.0, 40.0], [-10.0, 35.0]]]]
                }
            },
            {
                "type": "Feature",
                "id": 250,
                "properties": {},
                "geometry": { "type": "Point", "coordinates": [1.0, 1.0] }
            },
            {
                "type": "Feature",
                "properties": { "name": "Nameless" },
                "geometry": null
            }
        ]
    }"#;

    #[test]
    fn test_keeps_polygonal_features_with_ids() {
        let world = WorldGeometry::from_geojson_str(TWO_SQUARES).unwrap();
        assert_eq!(world.len(), 2);
        assert!(world.contains("FRA"));
        assert!(world.contains("ESP"));
        assert!(!world.contains("250"));
        assert_eq!(world.get("FRA").and_then(|s| s.name.as_deref()), Some("France"));
        assert_eq!(world.get("ESP").map(|s| s.shape.0.len()), Some(1));
    }

    #[test]
    fn test_bare_geometry_is_rejected() {
        let text = r#"{ "type": "Point", "coordinates": [0.0, 0.0] }"#;
        assert!(matches!(WorldGeometry::from_geojson_str(text), Err(DataError::GeoJson(_))));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(WorldGeometry::from_geojson_str("{ not json").is_err());
    }
}
