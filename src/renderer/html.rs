use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use super::cell::{Grid, PixelCell, RgbColor};
use crate::shared::constants;

/// How cells are laid out in the document
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// `<table>` with fixed-size pixel cells
    Table,
    /// Flex rows of divs sized to fill the viewport
    Flex,
}

/// Where a cell's background color comes from
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CellColor {
    /// Canonical color of the matched block
    Palette,
    /// Color sampled from the source image
    Source,
}

impl Layout {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "table" => Some(Layout::Table),
            "flex" => Some(Layout::Flex),
            _ => None,
        }
    }
}

impl CellColor {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "palette" => Some(CellColor::Palette),
            "source" => Some(CellColor::Source),
            _ => None,
        }
    }
}

/// Emits a self-contained HTML document for a grid.
///
/// Output depends only on the grid and the two options, so rendering the
/// same grid twice yields identical bytes.
pub struct HtmlRenderer {
    layout: Layout,
    cell_color: CellColor,
}

impl HtmlRenderer {
    pub fn new(layout: Layout, cell_color: CellColor) -> Self {
        Self { layout, cell_color }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn cell_color(&self) -> CellColor {
        self.cell_color
    }

    /// Side length of a flex cell in `vmin`, chosen so the longer grid side
    /// spans the whole viewport.
    pub fn flex_cell_size(grid: &Grid) -> f64 {
        100.0 / grid.width.max(grid.height).max(1) as f64
    }

    pub fn render_document(&self, grid: &Grid) -> String {
        // ~64 bytes of markup per cell
        let mut buffer = String::with_capacity(1024 + grid.cells.len() * 64);

        buffer.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>");
        buffer.push_str(constants::DOCUMENT_TITLE);
        buffer.push_str("</title>\n<style>\n");
        match self.layout {
            Layout::Table => {
                buffer.push_str("table { border-collapse: collapse; }\n");
                buffer.push_str("td { padding: 0; width: ");
                Self::write_u32(&mut buffer, constants::TABLE_CELL_PX);
                buffer.push_str("px; height: ");
                Self::write_u32(&mut buffer, constants::TABLE_CELL_PX);
                buffer.push_str("px; }\n");
            }
            Layout::Flex => {
                let size = format!("{:.4}", Self::flex_cell_size(grid));
                buffer.push_str("body { margin: 0; }\n");
                buffer.push_str(".grid { display: flex; flex-direction: column; }\n");
                buffer.push_str(".row { display: flex; }\n");
                buffer.push_str(".cell { flex: none; width: ");
                buffer.push_str(&size);
                buffer.push_str("vmin; height: ");
                buffer.push_str(&size);
                buffer.push_str("vmin; }\n");
            }
        }
        buffer.push_str("</style>\n</head>\n<body>\n");

        let (open, close, row_open, row_close, cell_open, cell_close) = match self.layout {
            Layout::Table => ("<table>\n", "</table>\n", "<tr>", "</tr>\n", "<td", "</td>"),
            Layout::Flex => (
                "<div class=\"grid\">\n",
                "</div>\n",
                "<div class=\"row\">",
                "</div>\n",
                "<div class=\"cell\"",
                "</div>",
            ),
        };

        buffer.push_str(open);
        for row in grid.rows() {
            buffer.push_str(row_open);
            for cell in row {
                buffer.push_str(cell_open);
                self.write_cell_attributes(&mut buffer, cell);
                buffer.push_str(cell_close);
            }
            buffer.push_str(row_close);
        }
        buffer.push_str(close);

        buffer.push_str("</body>\n</html>\n");
        buffer
    }

    /// Writes the document for `grid` to `output`, replacing any existing file.
    pub fn render(&self, grid: &Grid, output: &Path) -> Result<()> {
        let document = self.render_document(grid);
        fs::write(output, document.as_bytes())
            .with_context(|| format!("failed to write {}", output.display()))?;
        Ok(())
    }

    fn write_cell_attributes(&self, buffer: &mut String, cell: &PixelCell) {
        let color = match self.cell_color {
            CellColor::Palette => cell.matched.color,
            CellColor::Source => cell.source,
        };

        buffer.push_str(" title=\"");
        escape_html_into(buffer, cell.matched_name());
        buffer.push_str("\" style=\"background-color:");
        Self::write_rgb(buffer, color);
        buffer.push_str("\">");
    }

    fn write_rgb(buffer: &mut String, color: RgbColor) {
        buffer.push_str("rgb(");
        Self::write_u8_fast(buffer, color.0);
        buffer.push(',');
        Self::write_u8_fast(buffer, color.1);
        buffer.push(',');
        Self::write_u8_fast(buffer, color.2);
        buffer.push(')');
    }

    // Helper for allocation-free integer writing
    #[inline(always)]
    fn write_u8_fast(buffer: &mut String, mut n: u8) {
        if n >= 100 {
            buffer.push(char::from(b'0' + n / 100));
            n %= 100;
            buffer.push(char::from(b'0' + n / 10));
            n %= 10;
        } else if n >= 10 {
            buffer.push(char::from(b'0' + n / 10));
            n %= 10;
        }
        buffer.push(char::from(b'0' + n));
    }

    fn write_u32(buffer: &mut String, n: u32) {
        buffer.push_str(&n.to_string());
    }
}

pub fn escape_html_into(buffer: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => buffer.push_str("&amp;"),
            '<' => buffer.push_str("&lt;"),
            '>' => buffer.push_str("&gt;"),
            '"' => buffer.push_str("&quot;"),
            '\'' => buffer.push_str("&#39;"),
            _ => buffer.push(ch),
        }
    }
}
