//! Spleen bitmap font rasterizer.
//!
//! Spleen ships three embedded faces. A requested pixel size picks the
//! largest face that is not taller than the size, and glyphs are scaled to
//! the target cell with nearest-neighbour sampling so edges stay crisp on
//! the print head.
//!
//! ```text
//! size 12 → 6×12 native      size 24 → 12×24 native
//! size 16 → 8×16 native      size 36 → 12×24 scaled to 18×36
//! ```

use spleen_font::{FONT_6X12, FONT_8X16, FONT_12X24, PSF2Font};

use super::{TextRasterizer, check_font_size, embolden};
use crate::error::{BluberryError, Result};
use crate::render::raster::{DARK, PixelBuffer};

/// One embedded Spleen face.
#[derive(Debug, Clone, Copy)]
struct Face {
    name: &'static str,
    width: usize,
    height: usize,
    data: &'static [u8],
}

const FACES: [Face; 3] = [
    Face {
        name: "6x12",
        width: 6,
        height: 12,
        data: FONT_6X12,
    },
    Face {
        name: "8x16",
        width: 8,
        height: 16,
        data: FONT_8X16,
    },
    Face {
        name: "12x24",
        width: 12,
        height: 24,
        data: FONT_12X24,
    },
];

/// Character cell for a given size: which face, and how big each glyph is.
#[derive(Debug, Clone, Copy)]
struct Cell {
    face: Face,
    width: usize,
    height: usize,
}

impl Cell {
    fn for_size(font_size: f32) -> Self {
        let height = (font_size.round() as usize).max(1);
        let face = FACES
            .iter()
            .rev()
            .find(|f| f.height <= height)
            .copied()
            .unwrap_or(FACES[0]);
        let width = ((face.width * height + face.height / 2) / face.height).max(1);
        Self {
            face,
            width,
            height,
        }
    }
}

/// Built-in monospace rasterizer backed by the Spleen bitmap fonts.
///
/// Every character occupies one cell of `round(size × face_w / face_h)` dots,
/// so measuring is just `chars × cell_width` (+1 for synthetic bold).
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapFont;

impl BitmapFont {
    pub fn new() -> Self {
        Self
    }

    /// Cell width in dots at `font_size`.
    pub fn cell_width(&self, font_size: f32) -> Result<usize> {
        check_font_size(font_size)?;
        Ok(Cell::for_size(font_size).width)
    }
}

impl TextRasterizer for BitmapFont {
    fn measure(&self, text: &str, font_size: f32, bold: bool) -> Result<usize> {
        check_font_size(font_size)?;
        let cell = Cell::for_size(font_size);
        let chars = text.chars().count();
        if chars == 0 {
            return Ok(0);
        }
        Ok(chars * cell.width + usize::from(bold))
    }

    fn line_height(&self, font_size: f32, _bold: bool) -> Result<usize> {
        check_font_size(font_size)?;
        Ok(Cell::for_size(font_size).height)
    }

    fn rasterize(
        &self,
        text: &str,
        font_size: f32,
        bold: bool,
        width: usize,
        height: usize,
    ) -> Result<PixelBuffer> {
        check_font_size(font_size)?;
        let cell = Cell::for_size(font_size);
        let mut spleen = PSF2Font::new(cell.face.data).map_err(|e| {
            BluberryError::Rasterization(format!(
                "Failed to load Spleen {} font: {:?}",
                cell.face.name, e
            ))
        })?;

        let mut buf = PixelBuffer::new(width, height);
        let mut glyph = vec![false; cell.face.width * cell.face.height];

        for (i, ch) in text.chars().enumerate() {
            let origin_x = i * cell.width;
            if origin_x >= width {
                break;
            }

            glyph.iter_mut().for_each(|p| *p = false);
            let utf8 = ch.to_string();
            match spleen.glyph_for_utf8(utf8.as_bytes()) {
                Some(spleen_glyph) => {
                    for (row_y, row) in spleen_glyph.enumerate() {
                        for (col_x, on) in row.enumerate() {
                            if row_y < cell.face.height && col_x < cell.face.width {
                                glyph[row_y * cell.face.width + col_x] = on;
                            }
                        }
                    }
                }
                None => draw_box(&mut glyph, cell.face.width, cell.face.height),
            }

            // Nearest-neighbour scale from face to cell
            for dy in 0..cell.height.min(height) {
                let sy = dy * cell.face.height / cell.height;
                for dx in 0..cell.width {
                    let sx = dx * cell.face.width / cell.width;
                    if glyph[sy * cell.face.width + sx] {
                        buf.set(origin_x + dx, dy, DARK);
                    }
                }
            }
        }

        if bold {
            embolden(&mut buf);
        }
        Ok(buf)
    }
}

/// Outline box for characters the face does not cover.
fn draw_box(glyph: &mut [bool], width: usize, height: usize) {
    for x in 0..width {
        glyph[x] = true;
        glyph[(height - 1) * width + x] = true;
    }
    for y in 0..height {
        glyph[y * width] = true;
        glyph[y * width + width - 1] = true;
    }
}
