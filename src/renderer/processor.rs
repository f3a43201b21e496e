use super::cell::{Grid, PixelCell, RgbColor};
use crate::decoder::FrameData;
use crate::palette::ColorMatcher;

pub struct GridProcessor<'a> {
    matcher: &'a ColorMatcher<'a>,
}

impl<'a> GridProcessor<'a> {
    pub fn new(matcher: &'a ColorMatcher<'a>) -> Self {
        Self { matcher }
    }

    /// Maps every pixel of an RGB24 frame, top-to-bottom and left-to-right.
    pub fn process_frame(&self, frame: &FrameData) -> Grid {
        let w = frame.width as usize;
        let h = frame.height as usize;
        let pixel_data = &frame.buffer;

        let get_pixel = |x: usize, y: usize| -> RgbColor {
            let offset = (y * w + x) * 3;
            if offset + 2 < pixel_data.len() {
                RgbColor::from_slice(&pixel_data[offset..offset + 3])
            } else {
                RgbColor(0, 0, 0)
            }
        };

        let mut cells = Vec::with_capacity(w * h);
        for row in 0..h {
            for col in 0..w {
                let source = get_pixel(col, row);
                cells.push(PixelCell {
                    row,
                    col,
                    source,
                    matched: *self.matcher.match_color(source),
                });
            }
        }

        Grid { width: w, height: h, cells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{DistanceMetric, Palette, PaletteEntry, PaletteKind};

    #[test]
    fn test_black_white_row() {
        let palette = Palette::new(
            "bw",
            vec![
                PaletteEntry::new("Black", 0, 0, 0),
                PaletteEntry::new("White", 255, 255, 255),
            ],
        )
        .unwrap();
        let matcher = ColorMatcher::new(&palette, DistanceMetric::Cie76);
        let proc = GridProcessor::new(&matcher);

        let frame = FrameData::new(vec![0, 0, 0, 255, 255, 255], 2, 1);
        let grid = proc.process_frame(&frame);

        assert_eq!((grid.width, grid.height), (2, 1));
        assert_eq!(grid.names(), vec!["Black", "White"]);
        assert_eq!(grid.cells[1].source, RgbColor(255, 255, 255));
    }

    #[test]
    fn test_grid_matches_frame_dimensions_row_major() {
        let palette = PaletteKind::Concrete.build().unwrap();
        let matcher = ColorMatcher::new(&palette, DistanceMetric::Euclidean);
        let proc = GridProcessor::new(&matcher);

        let (w, h) = (3u32, 2u32);
        let mut frame = vec![0u8; (w * h * 3) as usize];
        // (2,1) white
        frame[15] = 255; frame[16] = 255; frame[17] = 255;
        let grid = proc.process_frame(&FrameData::new(frame, w, h));

        assert_eq!(grid.width, w as usize);
        assert_eq!(grid.height, h as usize);
        assert_eq!(grid.cells.len(), 6);
        for (i, cell) in grid.cells.iter().enumerate() {
            assert_eq!((cell.row, cell.col), (i / 3, i % 3));
        }
        assert_eq!(grid.get(1, 2).map(|c| c.matched_name()), Some("White Concrete"));
        assert_eq!(grid.get(0, 0).map(|c| c.matched_name()), Some("Black Concrete"));
        assert!(grid.get(2, 0).is_none());
    }
}
