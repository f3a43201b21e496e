use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::palette::{DistanceMetric, PaletteKind};
use crate::renderer::{CellColor, Layout};
use crate::shared::constants;

/// Presets for {palette, metric, layout}
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// Concrete palette, CIE76 distance, table of 10px cells
    Classic,
    /// Block palette, RGB distance, viewport-filling flex grid
    Flex,
}

impl RenderMode {
    pub fn palette(self) -> PaletteKind {
        match self {
            RenderMode::Classic => PaletteKind::Concrete,
            RenderMode::Flex => PaletteKind::Blocks,
        }
    }

    pub fn metric(self) -> DistanceMetric {
        match self {
            RenderMode::Classic => DistanceMetric::Cie76,
            RenderMode::Flex => DistanceMetric::Euclidean,
        }
    }

    pub fn layout(self) -> Layout {
        match self {
            RenderMode::Classic => Layout::Table,
            RenderMode::Flex => Layout::Flex,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "classic" => Some(RenderMode::Classic),
            "flex" => Some(RenderMode::Flex),
            _ => None,
        }
    }
}

/// Command-line overrides; unset flags keep the configured value.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct Overrides {
    /// Directory scanned for images
    #[arg(short, long)]
    pub input_dir: Option<PathBuf>,
    /// Directory receiving one HTML file per image
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    #[arg(short, long, value_enum)]
    pub mode: Option<RenderMode>,
    #[arg(short, long, value_enum)]
    pub palette: Option<PaletteKind>,
    #[arg(long, value_enum)]
    pub metric: Option<DistanceMetric>,
    #[arg(short, long, value_enum)]
    pub layout: Option<Layout>,
    #[arg(short, long, value_enum)]
    pub cell_color: Option<CellColor>,
    /// Longest side after resizing, 0 keeps the original size
    #[arg(long)]
    pub max_dimension: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub mode: RenderMode,
    /// `None` follows `mode`
    pub palette: Option<PaletteKind>,
    pub metric: Option<DistanceMetric>,
    pub layout: Option<Layout>,
    pub cell_color: CellColor,
    pub max_dimension: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(constants::INPUT_DIR),
            output_dir: PathBuf::from(constants::OUTPUT_DIR),
            mode: RenderMode::Classic,
            palette: None,
            metric: None,
            layout: None,
            cell_color: CellColor::Palette,
            max_dimension: constants::DEFAULT_MAX_DIMENSION,
        }
    }
}

impl Settings {
    /// Defaults, updated by `path` when the file exists.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_config_str(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parses `key = value` lines. A `#` opens a comment when it starts the
    /// line or stands alone between whitespace, so `Art #2` stays a value.
    pub fn from_config_str(content: &str) -> Result<Self> {
        let mut settings = Self::default();

        for (idx, line) in content.lines().enumerate() {
            let trimmed = strip_comment(line).trim();
            if trimmed.is_empty() {
                continue;
            }
            let Some((key, value)) = trimmed.split_once('=') else {
                bail!("line {}: expected `key = value`, got '{}'", idx + 1, trimmed);
            };
            let (key, value) = (key.trim(), value.trim());
            settings
                .set(key, value)
                .with_context(|| format!("line {}", idx + 1))?;
        }

        Ok(settings)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = || anyhow::anyhow!("invalid value '{}' for {}", value, key);
        match key {
            "input-dir" => self.input_dir = PathBuf::from(value),
            "output-dir" => self.output_dir = PathBuf::from(value),
            "mode" => self.mode = RenderMode::parse(value).ok_or_else(invalid)?,
            "palette" => self.palette = Some(PaletteKind::parse(value).ok_or_else(invalid)?),
            "metric" => self.metric = Some(DistanceMetric::parse(value).ok_or_else(invalid)?),
            "layout" => self.layout = Some(Layout::parse(value).ok_or_else(invalid)?),
            "cell-color" => self.cell_color = CellColor::parse(value).ok_or_else(invalid)?,
            "max-dimension" => self.max_dimension = value.parse().map_err(|_| invalid())?,
            _ => crate::utils::logger::info(&format!("ignoring unknown config key '{}'", key)),
        }
        Ok(())
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(dir) = &overrides.input_dir {
            self.input_dir = dir.clone();
        }
        if let Some(dir) = &overrides.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(mode) = overrides.mode {
            self.mode = mode;
        }
        self.palette = overrides.palette.or(self.palette);
        self.metric = overrides.metric.or(self.metric);
        self.layout = overrides.layout.or(self.layout);
        if let Some(cell_color) = overrides.cell_color {
            self.cell_color = cell_color;
        }
        if let Some(max_dimension) = overrides.max_dimension {
            self.max_dimension = max_dimension;
        }
    }

    pub fn palette_kind(&self) -> PaletteKind {
        self.palette.unwrap_or(self.mode.palette())
    }

    pub fn distance_metric(&self) -> DistanceMetric {
        self.metric.unwrap_or(self.mode.metric())
    }

    pub fn layout(&self) -> Layout {
        self.layout.unwrap_or(self.mode.layout())
    }

    /// Copy with every preset-driven field filled in
    pub fn resolved(&self) -> Self {
        Self {
            palette: Some(self.palette_kind()),
            metric: Some(self.distance_metric()),
            layout: Some(self.layout()),
            ..self.clone()
        }
    }
}

fn strip_comment(line: &str) -> &str {
    if line.trim_start().starts_with('#') {
        return "";
    }
    let bytes = line.as_bytes();
    for (idx, &b) in bytes.iter().enumerate() {
        if b != b'#' || idx == 0 {
            continue;
        }
        let after_ok = bytes.get(idx + 1).map_or(true, |c| c.is_ascii_whitespace());
        if bytes[idx - 1].is_ascii_whitespace() && after_ok {
            return &line[..idx];
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_hardcoded_program() {
        let settings = Settings::default();
        assert_eq!(settings.input_dir, Path::new("Input Images"));
        assert_eq!(settings.output_dir, Path::new("Ascii Art"));
        assert_eq!(settings.palette_kind(), PaletteKind::Concrete);
        assert_eq!(settings.distance_metric(), DistanceMetric::Cie76);
        assert_eq!(settings.layout(), Layout::Table);
        assert_eq!(settings.cell_color, CellColor::Palette);
        assert_eq!(settings.max_dimension, 128);
    }

    #[test]
    fn test_config_file_overrides_mode_preset() {
        let settings = Settings::from_config_str(
            "# flex output but keep the concrete blocks\n\
             mode = flex\n\
             palette = concrete   # trailing comment\n\
             cell-color = source\n\
             max-dimension = 64\n\
             input-dir = photos\n",
        )
        .unwrap();

        assert_eq!(settings.mode, RenderMode::Flex);
        assert_eq!(settings.palette_kind(), PaletteKind::Concrete);
        assert_eq!(settings.distance_metric(), DistanceMetric::Euclidean);
        assert_eq!(settings.layout(), Layout::Flex);
        assert_eq!(settings.cell_color, CellColor::Source);
        assert_eq!(settings.max_dimension, 64);
        assert_eq!(settings.input_dir, Path::new("photos"));
    }

    #[test]
    fn test_hash_inside_value_is_kept() {
        let settings = Settings::from_config_str(
            "output-dir = Art #2\n\
             input-dir = scans#raw   #\n\
             palette = blocks # ignored\n",
        )
        .unwrap();
        assert_eq!(settings.output_dir, Path::new("Art #2"));
        assert_eq!(settings.input_dir, Path::new("scans#raw"));
        assert_eq!(settings.palette, Some(PaletteKind::Blocks));
        assert_eq!(strip_comment("   # whole line"), "");
    }

    #[test]
    fn test_bad_config_values_are_errors() {
        assert!(Settings::from_config_str("mode = sideways").is_err());
        assert!(Settings::from_config_str("max-dimension = big").is_err());
        assert!(Settings::from_config_str("just some words").is_err());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let settings = Settings::from_config_str("font-size = 2.5\n").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut settings = Settings::from_config_str("mode = flex\nmetric = cie76\n").unwrap();
        settings.apply(&Overrides {
            metric: Some(DistanceMetric::Euclidean),
            layout: Some(Layout::Table),
            max_dimension: Some(0),
            ..Overrides::default()
        });

        let resolved = settings.resolved();
        assert_eq!(resolved.palette, Some(PaletteKind::Blocks));
        assert_eq!(resolved.metric, Some(DistanceMetric::Euclidean));
        assert_eq!(resolved.layout, Some(Layout::Table));
        assert_eq!(resolved.max_dimension, 0);
    }

    #[test]
    fn test_missing_config_file_gives_defaults() {
        let path = std::env::temp_dir().join("blockart-settings-test-does-not-exist.config");
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }
}
