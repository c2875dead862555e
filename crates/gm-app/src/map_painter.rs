//! Equirectangular world map drawn with the egui painter

use ahash::AHashMap;
use egui::{Color32, Mesh, Painter, Pos2, Rect, Shape, Stroke, Vec2};
use geo::TriangulateEarcut;
use gm_data::WorldGeometry;
use gm_views::MapRender;

const NO_DATA_OUTLINE: Color32 = Color32::from_rgb(190, 190, 190);
const OUTLINE: Color32 = Color32::from_rgb(120, 120, 120);
const SELECTED_OUTLINE: Color32 = Color32::from_rgb(20, 20, 20);

/// Longitude/latitude to screen position inside a 2:1 frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub frame: Rect,
}

impl Projection {
    /// Largest 2:1 frame centred in `available`
    pub fn fit(available: Rect) -> Self {
        let width = available.width().min(available.height() * 2.0);
        let size = Vec2::new(width, width / 2.0);
        Self {
            frame: Rect::from_center_size(available.center(), size),
        }
    }

    pub fn project(&self, lon: f64, lat: f64) -> Pos2 {
        let x = (lon + 180.0) / 360.0;
        let y = (90.0 - lat) / 180.0;
        Pos2::new(
            self.frame.left() + x as f32 * self.frame.width(),
            self.frame.top() + y as f32 * self.frame.height(),
        )
    }

    /// Inverse of [`Projection::project`], `None` outside the map frame
    pub fn unproject(&self, pos: Pos2) -> Option<(f64, f64)> {
        if !self.frame.contains(pos) {
            return None;
        }
        let x = f64::from((pos.x - self.frame.left()) / self.frame.width());
        let y = f64::from((pos.y - self.frame.top()) / self.frame.height());
        Some((x * 360.0 - 180.0, 90.0 - y * 180.0))
    }
}

/// One country outline, triangulated once in lon/lat space
struct PreparedCountry {
    code: String,
    vertices: Vec<(f64, f64)>,
    triangles: Vec<u32>,
    rings: Vec<Vec<(f64, f64)>>,
}

/// Cached triangulation of the world outlines
pub struct MapPainter {
    countries: Vec<PreparedCountry>,
}

impl MapPainter {
    pub fn new(geometry: &WorldGeometry) -> Self {
        let countries = geometry
            .shapes()
            .iter()
            .map(|shape| {
                let mut vertices = Vec::new();
                let mut triangles = Vec::new();
                let mut rings = Vec::new();

                for polygon in &shape.shape.0 {
                    let raw = polygon.earcut_triangles_raw();
                    let offset = vertices.len() as u32;
                    vertices.extend(raw.vertices.chunks_exact(2).map(|c| (c[0], c[1])));
                    triangles.extend(raw.triangle_indices.iter().map(|&i| offset + i as u32));
                    rings.push(polygon.exterior().coords().map(|c| (c.x, c.y)).collect());
                }

                PreparedCountry {
                    code: shape.id.clone(),
                    vertices,
                    triangles,
                    rings,
                }
            })
            .collect();

        Self { countries }
    }

    pub fn paint(&self, painter: &Painter, projection: &Projection, render: &MapRender) {
        let styles: AHashMap<&str, (Color32, bool, bool)> = render
            .countries
            .iter()
            .map(|c| (c.code.as_str(), (c.fill, c.selected, c.has_data)))
            .collect();

        let mut mesh = Mesh::default();
        for country in &self.countries {
            let Some(&(fill, _, _)) = styles.get(country.code.as_str()) else {
                continue;
            };
            let base = mesh.vertices.len() as u32;
            for &(lon, lat) in &country.vertices {
                mesh.colored_vertex(projection.project(lon, lat), fill);
            }
            for triangle in country.triangles.chunks_exact(3) {
                mesh.add_triangle(base + triangle[0], base + triangle[1], base + triangle[2]);
            }
        }
        painter.add(Shape::mesh(mesh));

        // selected outlines last so they sit on top of their neighbours
        let mut selected = Vec::new();
        for country in &self.countries {
            let (_, is_selected, has_data) = styles
                .get(country.code.as_str())
                .copied()
                .unwrap_or((Color32::TRANSPARENT, false, false));
            let stroke = match (is_selected, has_data) {
                (true, _) => {
                    selected.push(country);
                    continue;
                }
                (false, true) => Stroke::new(0.5, OUTLINE),
                (false, false) => Stroke::new(0.5, NO_DATA_OUTLINE),
            };
            Self::outline(painter, projection, country, stroke);
        }
        for country in selected {
            Self::outline(painter, projection, country, Stroke::new(2.0, SELECTED_OUTLINE));
        }
    }

    fn outline(painter: &Painter, projection: &Projection, country: &PreparedCountry, stroke: Stroke) {
        for ring in &country.rings {
            let points: Vec<Pos2> = ring.iter().map(|&(lon, lat)| projection.project(lon, lat)).collect();
            painter.add(Shape::closed_line(points, stroke));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection() -> Projection {
        Projection::fit(Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(800.0, 600.0)))
    }

    #[test]
    fn test_fit_keeps_two_to_one() {
        let projection = projection();
        assert_eq!(projection.frame.width(), 800.0);
        assert_eq!(projection.frame.height(), 400.0);
        assert_eq!(projection.frame.top(), 100.0);
    }

    #[test]
    fn test_project_corners_and_centre() {
        let projection = projection();
        assert_eq!(projection.project(-180.0, 90.0), Pos2::new(0.0, 100.0));
        assert_eq!(projection.project(180.0, -90.0), Pos2::new(800.0, 500.0));
        assert_eq!(projection.project(0.0, 0.0), Pos2::new(400.0, 300.0));
    }

    #[test]
    fn test_unproject_inverts() {
        let projection = projection();
        let (lon, lat) = projection.unproject(Pos2::new(600.0, 200.0)).unwrap();
        assert!((lon - 90.0).abs() < 1e-4);
        assert!((lat - 45.0).abs() < 1e-4);
        assert_eq!(projection.unproject(Pos2::new(400.0, 50.0)), None);
    }
}
