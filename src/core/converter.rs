use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::settings::Settings;
use crate::decoder::{load_image, sniff_format};
use crate::palette::{ColorMatcher, DistanceMetric, Palette};
use crate::renderer::{Grid, GridProcessor, HtmlRenderer};
use crate::utils::{file_utils, logger};

/// Per-run counts, printed once the directory is done
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConversionSummary {
    pub converted: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Outputs that replaced one written earlier in the same run
    pub overwritten: usize,
}

/// Single stderr line for a file that could not be converted.
pub fn failure_line(path: &Path, err: &anyhow::Error) -> String {
    format!("{}: {:#}", path.display(), err).replace('\n', " ")
}

/// Runs list -> decode -> resize -> map -> render -> write over a directory.
pub struct Converter {
    palette: Palette,
    metric: DistanceMetric,
    renderer: HtmlRenderer,
    max_dimension: u32,
}

impl Converter {
    pub fn new(settings: &Settings) -> Result<Self> {
        let palette = settings
            .palette_kind()
            .build()
            .context("palette configuration is unusable")?;

        Ok(Self {
            palette,
            metric: settings.distance_metric(),
            renderer: HtmlRenderer::new(settings.layout(), settings.cell_color),
            max_dimension: settings.max_dimension,
        })
    }

    /// Converts every image in `input_dir`.
    ///
    /// Only an unreadable input directory or an uncreatable output directory
    /// is an error; individual files that fail are reported and counted.
    /// A file is an image when its extension says so or when its leading
    /// bytes carry a JPEG, PNG or GIF signature.
    pub fn run(&self, input_dir: &Path, output_dir: &Path) -> Result<ConversionSummary> {
        let files = file_utils::list_files(input_dir)
            .with_context(|| format!("failed to list images in {}", input_dir.display()))?;
        file_utils::ensure_dir(output_dir)?;

        logger::info(&format!(
            "converting {} file(s) from {} into {} (palette={} metric={:?} layout={:?} cell-color={:?} max-dimension={})",
            files.len(),
            input_dir.display(),
            output_dir.display(),
            self.palette.name(),
            self.metric,
            self.renderer.layout(),
            self.renderer.cell_color(),
            self.max_dimension
        ));

        let matcher = ColorMatcher::new(&self.palette, self.metric);
        let mut summary = ConversionSummary::default();
        let mut written: HashSet<PathBuf> = HashSet::new();

        for path in files {
            let bytes = match file_utils::read_file(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    logger::error(&failure_line(&path, &e.context("failed to open image")));
                    summary.failed += 1;
                    continue;
                }
            };

            if !file_utils::is_image_file(&path) && sniff_format(&bytes).is_none() {
                logger::debug(&format!("skipping non-image file {}", path.display()));
                summary.skipped += 1;
                continue;
            }

            let output = file_utils::output_path_for(&path, output_dir);
            match self.convert_bytes(&matcher, &bytes, &output) {
                Ok(()) => {
                    logger::info(&format!("{} -> {}", path.display(), output.display()));
                    if !written.insert(output.clone()) {
                        logger::warn(&format!(
                            "{} replaced {}, which an earlier file in this run also produced",
                            path.display(),
                            output.display()
                        ));
                        summary.overwritten += 1;
                    }
                    summary.converted += 1;
                }
                Err(e) => {
                    logger::error(&failure_line(&path, &e));
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Builds the grid for the contents of one image file.
    pub fn grid_from_bytes(&self, matcher: &ColorMatcher<'_>, bytes: &[u8]) -> Result<Grid> {
        let frame = load_image(bytes, self.max_dimension)?;
        Ok(GridProcessor::new(matcher).process_frame(&frame))
    }

    fn convert_bytes(&self, matcher: &ColorMatcher<'_>, bytes: &[u8], output: &Path) -> Result<()> {
        let grid = self.grid_from_bytes(matcher, bytes)?;
        self.renderer
            .render(&grid, output)
            .context("failed to generate HTML")
    }
}
