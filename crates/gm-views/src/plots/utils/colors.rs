//! Color utilities for plots

use egui::Color32;

/// Sequential reds used by the choropleth, light to dark
pub const MAP_PALETTE: [Color32; 8] = [
    Color32::from_rgb(0xff, 0xf7, 0xee),
    Color32::from_rgb(0xff, 0xd6, 0xca),
    Color32::from_rgb(0xff, 0xaf, 0x96),
    Color32::from_rgb(0xfb, 0x82, 0x60),
    Color32::from_rgb(0xf4, 0x4f, 0x39),
    Color32::from_rgb(0xd5, 0x22, 0x20),
    Color32::from_rgb(0xab, 0x11, 0x15),
    Color32::from_rgb(0x67, 0x01, 0x0f),
];

/// Bar fill
pub const STEEL_BLUE: Color32 = Color32::from_rgb(70, 130, 180);

/// Maps a continuous domain onto a fixed list of colors in equal steps.
///
/// Values below the domain take the first color and values above it the
/// last. A degenerate domain puts its single value in the last bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizeScale {
    domain: (f64, f64),
    thresholds: Vec<f64>,
    range: Vec<Color32>,
}

impl QuantizeScale {
    pub fn new(domain: (f64, f64), range: &[Color32]) -> Self {
        let (min, max) = domain;
        let steps = range.len();
        let thresholds = (1..steps)
            .map(|i| min + (max - min) * i as f64 / steps as f64)
            .collect();
        Self {
            domain,
            thresholds,
            range: range.to_vec(),
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Bucket boundaries between consecutive colors
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Index of the color `value` falls into
    pub fn bucket(&self, value: f64) -> usize {
        self.thresholds.partition_point(|t| *t <= value)
    }

    /// Color for `value`, transparent when the range is empty
    pub fn color(&self, value: f64) -> Color32 {
        self.range
            .get(self.bucket(value))
            .copied()
            .unwrap_or(Color32::TRANSPARENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_range_is_transparent() {
        let scale = QuantizeScale::new((0.0, 10.0), &[]);
        assert_eq!(scale.bucket(5.0), 0);
        assert_eq!(scale.color(5.0), Color32::TRANSPARENT);
    }

    #[test]
    fn test_equal_steps() {
        let scale = QuantizeScale::new((0.0, 80.0), &MAP_PALETTE);
        assert_eq!(scale.thresholds(), &[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]);
        assert_eq!(scale.bucket(0.0), 0);
        assert_eq!(scale.bucket(9.99), 0);
        assert_eq!(scale.bucket(10.0), 1);
        assert_eq!(scale.bucket(45.0), 4);
        assert_eq!(scale.bucket(80.0), 7);
        assert_eq!(scale.color(80.0), MAP_PALETTE[7]);
    }

    #[test]
    fn test_clamps_outside_domain() {
        let scale = QuantizeScale::new((20.0, 100.0), &MAP_PALETTE);
        assert_eq!(scale.bucket(0.0), 0);
        assert_eq!(scale.bucket(1000.0), 7);
    }

    #[test]
    fn test_degenerate_domain() {
        let scale = QuantizeScale::new((5.0, 5.0), &MAP_PALETTE);
        assert_eq!(scale.bucket(5.0), 7);
        assert_eq!(scale.bucket(4.0), 0);
    }
}
