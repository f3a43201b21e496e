use ::palette::{FromColor, Lab, LinSrgb, Srgb};
use serde::Serialize;

use super::{Palette, PaletteEntry};
use crate::renderer::cell::RgbColor;

/// Distance function used for nearest-color matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DistanceMetric {
    /// Euclidean distance in CIE L*a*b* (D65)
    Cie76,
    /// Euclidean distance over 0-255 RGB channels
    Euclidean,
}

impl DistanceMetric {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cie76" => Some(DistanceMetric::Cie76),
            "euclidean" => Some(DistanceMetric::Euclidean),
            _ => None,
        }
    }
}

fn to_lab(color: RgbColor) -> [f32; 3] {
    let srgb = Srgb::new(
        color.0 as f32 / 255.0,
        color.1 as f32 / 255.0,
        color.2 as f32 / 255.0,
    );
    let lin: LinSrgb<f32> = srgb.into_linear();
    let lab: Lab = Lab::from_color(lin);
    [lab.l, lab.a, lab.b]
}

fn rgb_coords(color: RgbColor) -> [f32; 3] {
    [color.0 as f32, color.1 as f32, color.2 as f32]
}

#[inline]
fn euclidean(a: [f32; 3], b: [f32; 3]) -> f32 {
    let d0 = a[0] - b[0];
    let d1 = a[1] - b[1];
    let d2 = a[2] - b[2];
    (d0 * d0 + d1 * d1 + d2 * d2).sqrt()
}

/// Maps colors to the nearest entry of a palette.
///
/// Entry coordinates in the metric's space are computed once here, so a
/// lookup costs one conversion of the target plus a linear scan.
pub struct ColorMatcher<'a> {
    palette: &'a Palette,
    metric: DistanceMetric,
    coords: Vec<[f32; 3]>,
}

impl<'a> ColorMatcher<'a> {
    pub fn new(palette: &'a Palette, metric: DistanceMetric) -> Self {
        let coords = palette
            .entries()
            .iter()
            .map(|entry| project(metric, entry.color))
            .collect();
        Self { palette, metric, coords }
    }

    /// Distance between two colors under this matcher's metric
    #[cfg(test)]
    pub fn distance(&self, a: RgbColor, b: RgbColor) -> f32 {
        euclidean(project(self.metric, a), project(self.metric, b))
    }

    /// Nearest palette entry; on a tie the earlier entry wins.
    pub fn match_color(&self, target: RgbColor) -> &'a PaletteEntry {
        let target = project(self.metric, target);
        let entries = self.palette.entries();

        let mut best = 0;
        let mut best_d = f32::MAX;
        for (i, coords) in self.coords.iter().enumerate() {
            let d = euclidean(target, *coords);
            if d < best_d {
                best_d = d;
                best = i;
                if d == 0.0 {
                    break;
                }
            }
        }
        &entries[best]
    }

    #[cfg(test)]
    pub fn match_name(&self, target: RgbColor) -> &'static str {
        self.match_color(target).name
    }
}

fn project(metric: DistanceMetric, color: RgbColor) -> [f32; 3] {
    match metric {
        DistanceMetric::Cie76 => to_lab(color),
        DistanceMetric::Euclidean => rgb_coords(color),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteKind;

    const METRICS: [DistanceMetric; 2] = [DistanceMetric::Cie76, DistanceMetric::Euclidean];

    fn black_white() -> Palette {
        Palette::new(
            "bw",
            vec![
                PaletteEntry::new("Black", 0, 0, 0),
                PaletteEntry::new("White", 255, 255, 255),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_exact_colors_match_their_entry() {
        for kind in [PaletteKind::Concrete, PaletteKind::Blocks] {
            let palette = kind.build().unwrap();
            for metric in METRICS {
                let matcher = ColorMatcher::new(&palette, metric);
                for entry in palette.entries() {
                    assert_eq!(matcher.match_name(entry.color), entry.name, "{:?}", metric);
                }
            }
        }
    }

    #[test]
    fn test_result_always_in_palette() {
        let palette = PaletteKind::Blocks.build().unwrap();
        for metric in METRICS {
            let matcher = ColorMatcher::new(&palette, metric);
            for r in (0..=255u16).step_by(51) {
                for g in (0..=255u16).step_by(51) {
                    for b in (0..=255u16).step_by(51) {
                        let name = matcher.match_name(RgbColor(r as u8, g as u8, b as u8));
                        assert!(palette.get(name).is_some());
                    }
                }
            }
        }
    }

    #[test]
    fn test_distance_is_symmetric_and_non_negative() {
        let palette = black_white();
        let samples = [
            RgbColor(0, 0, 0),
            RgbColor(255, 255, 255),
            RgbColor(12, 200, 99),
            RgbColor(250, 3, 128),
        ];
        for metric in METRICS {
            let matcher = ColorMatcher::new(&palette, metric);
            for a in samples {
                assert_eq!(matcher.distance(a, a), 0.0);
                for b in samples {
                    let ab = matcher.distance(a, b);
                    assert_eq!(ab, matcher.distance(b, a));
                    assert!(ab >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_tie_goes_to_first_entry() {
        let palette = Palette::new(
            "tie",
            vec![
                PaletteEntry::new("Low", 0, 0, 0),
                PaletteEntry::new("High", 2, 2, 2),
            ],
        )
        .unwrap();
        let matcher = ColorMatcher::new(&palette, DistanceMetric::Euclidean);
        assert_eq!(matcher.match_name(RgbColor(1, 1, 1)), "Low");
    }

    #[test]
    fn test_near_colors() {
        let palette = black_white();
        for metric in METRICS {
            let matcher = ColorMatcher::new(&palette, metric);
            assert_eq!(matcher.match_name(RgbColor(30, 20, 10)), "Black");
            assert_eq!(matcher.match_name(RgbColor(230, 240, 250)), "White");
        }
    }

    #[test]
    fn test_concrete_picks_obvious_blocks() {
        let palette = PaletteKind::Concrete.build().unwrap();
        let matcher = ColorMatcher::new(&palette, DistanceMetric::Cie76);
        assert_eq!(matcher.match_name(RgbColor(0, 0, 0)), "Black Concrete");
        assert_eq!(matcher.match_name(RgbColor(255, 255, 255)), "White Concrete");
        assert_eq!(matcher.match_name(RgbColor(230, 100, 40)), "Orange Concrete");
    }
}
