//! Built-in block palettes.
//!
//! Palettes are ordered: nearest-color ties resolve to the entry that comes
//! first, so the tables below must never be reordered casually.

pub mod matcher;

use serde::Serialize;
use std::fmt;

use crate::renderer::cell::RgbColor;

pub use matcher::{ColorMatcher, DistanceMetric};

/// A named block color
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct PaletteEntry {
    pub name: &'static str,
    pub color: RgbColor,
}

impl PaletteEntry {
    pub const fn new(name: &'static str, r: u8, g: u8, b: u8) -> Self {
        Self { name, color: RgbColor(r, g, b) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    Empty(&'static str),
    DuplicateName { palette: &'static str, name: &'static str },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::Empty(palette) => write!(f, "palette '{}' has no entries", palette),
            PaletteError::DuplicateName { palette, name } => {
                write!(f, "palette '{}' lists '{}' more than once", palette, name)
            }
        }
    }
}

impl std::error::Error for PaletteError {}

#[derive(Debug, Clone, Serialize)]
pub struct Palette {
    name: &'static str,
    entries: Vec<PaletteEntry>,
}

impl Palette {
    pub fn new(name: &'static str, entries: Vec<PaletteEntry>) -> Result<Self, PaletteError> {
        if entries.is_empty() {
            return Err(PaletteError::Empty(name));
        }
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|earlier| earlier.name == entry.name) {
                return Err(PaletteError::DuplicateName { palette: name, name: entry.name });
            }
        }
        Ok(Self { name, entries })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&PaletteEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }
}

/// Selects one of the hardcoded palettes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PaletteKind {
    /// 16 concrete colors
    Concrete,
    /// 36 wool, terracotta and building blocks
    Blocks,
}

impl PaletteKind {
    pub fn build(self) -> Result<Palette, PaletteError> {
        match self {
            PaletteKind::Concrete => Palette::new("concrete", CONCRETE.to_vec()),
            PaletteKind::Blocks => Palette::new("blocks", BLOCKS.to_vec()),
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "concrete" => Some(PaletteKind::Concrete),
            "blocks" => Some(PaletteKind::Blocks),
            _ => None,
        }
    }
}

pub const CONCRETE: &[PaletteEntry] = &[
    PaletteEntry::new("Black Concrete", 20, 20, 20),
    PaletteEntry::new("Red Concrete", 164, 57, 57),
    PaletteEntry::new("Green Concrete", 117, 122, 57),
    PaletteEntry::new("Brown Concrete", 139, 69, 52),
    PaletteEntry::new("Blue Concrete", 57, 60, 139),
    PaletteEntry::new("Purple Concrete", 100, 57, 132),
    PaletteEntry::new("Cyan Concrete", 57, 145, 132),
    PaletteEntry::new("Light Gray Concrete", 132, 132, 132),
    PaletteEntry::new("Gray Concrete", 81, 81, 81),
    PaletteEntry::new("Pink Concrete", 237, 117, 147),
    PaletteEntry::new("Lime Concrete", 152, 190, 55),
    PaletteEntry::new("Yellow Concrete", 239, 190, 48),
    PaletteEntry::new("Light Blue Concrete", 88, 111, 147),
    PaletteEntry::new("Magenta Concrete", 158, 57, 132),
    PaletteEntry::new("Orange Concrete", 225, 97, 44),
    PaletteEntry::new("White Concrete", 241, 241, 241),
];

pub const BLOCKS: &[PaletteEntry] = &[
    PaletteEntry::new("White Wool", 234, 236, 237),
    PaletteEntry::new("Orange Wool", 241, 118, 20),
    PaletteEntry::new("Magenta Wool", 190, 69, 180),
    PaletteEntry::new("Light Blue Wool", 58, 175, 217),
    PaletteEntry::new("Yellow Wool", 249, 198, 40),
    PaletteEntry::new("Lime Wool", 112, 185, 26),
    PaletteEntry::new("Pink Wool", 238, 141, 172),
    PaletteEntry::new("Gray Wool", 63, 68, 72),
    PaletteEntry::new("Light Gray Wool", 142, 142, 135),
    PaletteEntry::new("Cyan Wool", 21, 138, 145),
    PaletteEntry::new("Purple Wool", 122, 42, 173),
    PaletteEntry::new("Blue Wool", 53, 57, 157),
    PaletteEntry::new("Brown Wool", 114, 72, 41),
    PaletteEntry::new("Green Wool", 85, 110, 28),
    PaletteEntry::new("Red Wool", 161, 39, 35),
    PaletteEntry::new("Black Wool", 21, 21, 26),
    PaletteEntry::new("Terracotta", 152, 94, 68),
    PaletteEntry::new("White Terracotta", 210, 178, 161),
    PaletteEntry::new("Orange Terracotta", 162, 84, 38),
    PaletteEntry::new("Magenta Terracotta", 150, 88, 109),
    PaletteEntry::new("Light Blue Terracotta", 113, 109, 138),
    PaletteEntry::new("Yellow Terracotta", 186, 133, 35),
    PaletteEntry::new("Lime Terracotta", 104, 118, 53),
    PaletteEntry::new("Pink Terracotta", 162, 78, 79),
    PaletteEntry::new("Gray Terracotta", 58, 42, 36),
    PaletteEntry::new("Light Gray Terracotta", 135, 107, 98),
    PaletteEntry::new("Cyan Terracotta", 87, 91, 91),
    PaletteEntry::new("Purple Terracotta", 118, 70, 86),
    PaletteEntry::new("Blue Terracotta", 74, 60, 91),
    PaletteEntry::new("Brown Terracotta", 77, 51, 36),
    PaletteEntry::new("Green Terracotta", 76, 83, 42),
    PaletteEntry::new("Red Terracotta", 143, 61, 47),
    PaletteEntry::new("Black Terracotta", 37, 23, 16),
    PaletteEntry::new("Stone", 126, 126, 126),
    PaletteEntry::new("Sandstone", 216, 203, 155),
    PaletteEntry::new("Oak Planks", 162, 131, 79),
];
