//! TrueType / OpenType rasterizer.
//!
//! Renders anti-aliased coverage with ab_glyph. This is the path for
//! scripts the bitmap font cannot cover (Hangul receipts, accented
//! product names): point it at any font file that has the glyphs.

use std::path::Path;

use ab_glyph::{Font, FontArc, GlyphId, ScaleFont, point};

use super::{TextRasterizer, check_font_size, embolden};
use crate::error::{BluberryError, Result};
use crate::render::raster::PixelBuffer;

/// Outline font loaded from bytes or a file, with an optional bold face.
#[derive(Clone)]
pub struct TtfFont {
    regular: FontArc,
    bold: Option<FontArc>,
}

impl std::fmt::Debug for TtfFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtfFont")
            .field("glyphs", &self.regular.glyph_count())
            .field("bold_face", &self.bold.is_some())
            .finish()
    }
}

fn parse_font(bytes: Vec<u8>, what: &str) -> Result<FontArc> {
    FontArc::try_from_vec(bytes)
        .map_err(|e| BluberryError::Rasterization(format!("Failed to load {}: {}", what, e)))
}

fn read_font_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        BluberryError::Rasterization(format!("Failed to read font {}: {}", path.display(), e))
    })
}

impl TtfFont {
    /// Parse a regular face from raw font bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Ok(Self {
            regular: parse_font(bytes, "font")?,
            bold: None,
        })
    }

    /// Load a regular face from a font file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading font {}", path.display());
        Self::from_bytes(read_font_file(path)?)
    }

    /// Use a dedicated bold face instead of synthetic bold.
    pub fn with_bold_bytes(mut self, bytes: Vec<u8>) -> Result<Self> {
        self.bold = Some(parse_font(bytes, "bold font")?);
        Ok(self)
    }

    /// Load the bold face from a font file.
    pub fn with_bold_path<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading bold font {}", path.display());
        self.with_bold_bytes(read_font_file(path)?)
    }

    /// Face for a weight, and whether bold still has to be synthesized.
    fn face(&self, bold: bool) -> (&FontArc, bool) {
        match (&self.bold, bold) {
            (Some(face), true) => (face, false),
            (None, true) => (&self.regular, true),
            (_, false) => (&self.regular, false),
        }
    }

    /// Glyph ids and pen positions along the baseline, plus the advance width.
    fn layout(font: &FontArc, text: &str, font_size: f32) -> (Vec<(GlyphId, f32)>, f32) {
        let scaled = font.as_scaled(font_size);
        let mut glyphs = Vec::with_capacity(text.len());
        let mut caret_x = 0.0f32;
        let mut previous: Option<GlyphId> = None;

        for ch in text.chars() {
            let glyph_id = font.glyph_id(ch);
            if let Some(prev) = previous {
                caret_x += scaled.kern(prev, glyph_id);
            }
            glyphs.push((glyph_id, caret_x));
            caret_x += scaled.h_advance(glyph_id);
            previous = Some(glyph_id);
        }

        (glyphs, caret_x)
    }
}

impl TextRasterizer for TtfFont {
    fn measure(&self, text: &str, font_size: f32, bold: bool) -> Result<usize> {
        check_font_size(font_size)?;
        if text.is_empty() {
            return Ok(0);
        }
        let (font, synthetic) = self.face(bold);
        let (_, advance) = Self::layout(font, text, font_size);
        Ok(advance.max(0.0).ceil() as usize + usize::from(synthetic))
    }

    fn line_height(&self, font_size: f32, bold: bool) -> Result<usize> {
        check_font_size(font_size)?;
        let (font, _) = self.face(bold);
        let scaled = font.as_scaled(font_size);
        let height = (scaled.ascent() - scaled.descent() + scaled.line_gap()).ceil();
        Ok((height.max(1.0)) as usize)
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
        let (font, synthetic) = self.face(bold);
        let baseline_y = font.as_scaled(font_size).ascent();
        let (glyphs, _) = Self::layout(font, text, font_size);

        let mut buf = PixelBuffer::new(width, height);
        for (glyph_id, glyph_x) in glyphs {
            if glyph_x >= width as f32 {
                break;
            }
            let glyph = glyph_id.with_scale_and_position(font_size, point(glyph_x, baseline_y));
            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|px, py, coverage| {
                    let x = px as i32 + bounds.min.x as i32;
                    let y = py as i32 + bounds.min.y as i32;
                    if x >= 0 && y >= 0 {
                        let value = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                        buf.darken(x as usize, y as usize, value);
                    }
                });
            }
        }

        if synthetic {
            embolden(&mut buf);
        }
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Common system font locations; tests that need real outlines skip
    /// when none is installed.
    const SYSTEM_FONTS: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/Library/Fonts/Arial.ttf",
    ];

    fn system_font() -> Option<TtfFont> {
        SYSTEM_FONTS
            .iter()
            .find_map(|path| TtfFont::from_path(path).ok())
    }

    #[test]
    fn test_invalid_bytes_is_rasterization_error() {
        let result = TtfFont::from_bytes(vec![0, 1, 2, 3]);
        assert!(matches!(result, Err(BluberryError::Rasterization(_))));
    }

    #[test]
    fn test_missing_file_is_rasterization_error() {
        let result = TtfFont::from_path("/nonexistent/font.ttf");
        assert!(matches!(result, Err(BluberryError::Rasterization(_))));
    }

    #[test]
    fn test_render_basic_text() {
        let Some(font) = system_font() else {
            eprintln!("no system font found, skipping");
            return;
        };
        let width = font.measure("Hello", 24.0, false).unwrap();
        let height = font.line_height(24.0, false).unwrap();
        assert!(width > 0);
        assert!(height >= 24);

        let buf = font.rasterize("Hello", 24.0, false, 200, height).unwrap();
        let bounds = buf.dark_bounds(1).expect("text should have coverage");
        assert!(bounds.right <= width + 1);
    }

    #[test]
    fn test_anti_aliased_output() {
        let Some(font) = system_font() else {
            return;
        };
        let buf = font.rasterize("Smooth", 48.0, false, 300, 60).unwrap();
        assert!(buf.pixels().iter().any(|&v| v > 10 && v < 245));
    }

    #[test]
    fn test_synthetic_bold_is_wider() {
        let Some(font) = system_font() else {
            return;
        };
        let regular = font.measure("Bold", 24.0, false).unwrap();
        let bold = font.measure("Bold", 24.0, true).unwrap();
        assert_eq!(bold, regular + 1);
    }
}
