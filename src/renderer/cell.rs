use serde::Serialize;

use crate::palette::PaletteEntry;

/// Represents a 24-bit RGB color
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize)]
pub struct RgbColor(pub u8, pub u8, pub u8);

impl RgbColor {
    pub fn from_slice(rgb: &[u8]) -> Self {
        Self(rgb[0], rgb[1], rgb[2])
    }
}

/// One source pixel after palette mapping.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(dead_code)]
pub struct PixelCell {
    pub row: usize,
    pub col: usize,
    pub source: RgbColor,
    pub matched: PaletteEntry,
}

impl PixelCell {
    pub fn matched_name(&self) -> &'static str {
        self.matched.name
    }
}

/// Row-major grid of mapped pixels for one output document.
#[derive(Clone, PartialEq, Debug)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<PixelCell>,
}

impl Grid {
    pub fn rows(&self) -> impl Iterator<Item = &[PixelCell]> {
        // chunks(0) panics, an empty grid simply has no rows
        self.cells.chunks(self.width.max(1))
    }

    #[cfg(test)]
    pub fn get(&self, row: usize, col: usize) -> Option<&PixelCell> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.cells.get(row * self.width + col)
    }

    #[cfg(test)]
    pub fn names(&self) -> Vec<&'static str> {
        self.cells.iter().map(PixelCell::matched_name).collect()
    }
}
