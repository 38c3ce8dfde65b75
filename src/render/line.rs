//! # Line Rasterizer
//!
//! Turns one [`StyledLine`] into a paper-wide [`PixelBuffer`].
//!
//! ```text
//! target_width = 384
//! ┌──────────────────────────────────────────────┐
//! │HELLO                                         │  Left:   offset 0
//! │                    HELLO                     │  Center: (384 - w) / 2
//! │                                         HELLO│  Right:  384 - w
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Text wider than the paper starts at offset 0 and is clipped on the
//! right, whatever the alignment. Ink that overhangs the last glyph's
//! advance is kept up to the paper edge. Wrapping happens earlier, in the
//! compositor.

use serde::{Deserialize, Serialize};

use crate::error::{BluberryError, Result};
use crate::render::font::{TextRasterizer, check_font_size};
use crate::render::raster::PixelBuffer;

/// Horizontal placement of a line on the paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Left offset in dots for text of `text_width` on `target_width` paper.
    pub fn offset(self, text_width: usize, target_width: usize) -> usize {
        let slack = target_width.saturating_sub(text_width);
        match self {
            Alignment::Left => 0,
            Alignment::Center => slack / 2,
            Alignment::Right => slack,
        }
    }
}

/// One line of receipt text with its resolved style.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledLine {
    pub text: String,
    pub font_size: f32,
    pub bold: bool,
    pub align: Alignment,
}

impl StyledLine {
    /// Left-aligned regular text.
    pub fn new(text: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
            bold: false,
            align: Alignment::Left,
        }
    }

    /// Empty line of the given size.
    pub fn blank(font_size: f32) -> Self {
        Self::new(String::new(), font_size)
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }
}

/// Render one line into a `target_width × line_height` buffer.
pub fn render_line(
    rasterizer: &dyn TextRasterizer,
    line: &StyledLine,
    target_width: usize,
) -> Result<PixelBuffer> {
    check_font_size(line.font_size)?;
    if target_width == 0 {
        return Err(BluberryError::Rasterization(
            "target width must be positive".to_string(),
        ));
    }

    let line_height = rasterizer.line_height(line.font_size, line.bold)?;
    let mut out = PixelBuffer::new(target_width, line_height);
    if line.text.is_empty() {
        return Ok(out);
    }

    let text_width = rasterizer.measure(&line.text, line.font_size, line.bold)?;
    let offset = line.align.offset(text_width, target_width);
    // Ink may overhang the last advance, so draw up to the paper edge.
    let available = target_width - offset;
    if line_height == 0 {
        return Ok(out);
    }

    let glyphs =
        rasterizer.rasterize(&line.text, line.font_size, line.bold, available, line_height)?;
    out.blit(&glyphs, offset, 0);

    log::trace!(
        "line {:?}: {}x{} text at offset {} ({:?})",
        line.text,
        text_width,
        line_height,
        offset,
        line.align
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::font::testing::{BlockFont, BrokenFont};
    use crate::render::raster::DarkBounds;
    use pretty_assertions::assert_eq;

    fn bounds(line: &StyledLine, width: usize) -> DarkBounds {
        render_line(&BlockFont, line, width)
            .unwrap()
            .dark_bounds(128)
            .expect("line should have ink")
    }

    #[test]
    fn test_offsets() {
        assert_eq!(Alignment::Left.offset(60, 384), 0);
        assert_eq!(Alignment::Center.offset(60, 384), 162);
        assert_eq!(Alignment::Right.offset(60, 384), 324);
        // Wider than paper clamps to zero
        assert_eq!(Alignment::Center.offset(500, 384), 0);
        assert_eq!(Alignment::Right.offset(500, 384), 0);
    }

    #[test]
    fn test_left_alignment() {
        let b = bounds(&StyledLine::new("HELLO", 24.0), 384);
        assert_eq!((b.left, b.right), (0, 60));
    }

    #[test]
    fn test_right_alignment() {
        let line = StyledLine::new("HELLO", 24.0).align(Alignment::Right);
        let b = bounds(&line, 384);
        assert_eq!(384 - b.right, 0);
        assert_eq!(b.left, 324);
    }

    #[test]
    fn test_center_alignment_margins() {
        // Odd slack: 385 - 60 = 325
        for width in [384, 385] {
            let line = StyledLine::new("HELLO", 24.0).align(Alignment::Center);
            let b = bounds(&line, width);
            let left_margin = b.left;
            let right_margin = width - b.right;
            assert!(left_margin.abs_diff(right_margin) <= 1);
        }
    }

    #[test]
    fn test_output_dimensions() {
        let buf = render_line(&BlockFont, &StyledLine::new("x", 30.0), 100).unwrap();
        assert_eq!(buf.width(), 100);
        assert_eq!(buf.height(), 30);
    }

    #[test]
    fn test_empty_text_is_blank_line() {
        let buf = render_line(&BlockFont, &StyledLine::blank(24.0), 384).unwrap();
        assert_eq!(buf.height(), 24);
        assert!(buf.dark_bounds(1).is_none());
    }

    #[test]
    fn test_wide_text_clips_from_left() {
        // 40 chars * 12 = 480 dots on 384 paper
        let line = StyledLine::new("X".repeat(40), 24.0).align(Alignment::Right);
        let buf = render_line(&BlockFont, &line, 384).unwrap();
        assert_eq!(buf.width(), 384);
        let b = buf.dark_bounds(128).unwrap();
        assert_eq!((b.left, b.right), (0, 384));
    }

    /// Block glyphs whose ink runs `OVERHANG` dots past their advance,
    /// like an italic or a trailing `f` in a TTF face.
    struct OverhangFont;

    const OVERHANG: usize = 3;

    impl TextRasterizer for OverhangFont {
        fn measure(&self, text: &str, font_size: f32, bold: bool) -> Result<usize> {
            BlockFont.measure(text, font_size, bold)
        }

        fn line_height(&self, font_size: f32, bold: bool) -> Result<usize> {
            BlockFont.line_height(font_size, bold)
        }

        fn rasterize(
            &self,
            text: &str,
            font_size: f32,
            _bold: bool,
            width: usize,
            height: usize,
        ) -> Result<PixelBuffer> {
            let advance = self.measure(text, font_size, false)?;
            let mut buf = PixelBuffer::new(width, height);
            for y in 0..height {
                for x in 0..advance + OVERHANG {
                    buf.set(x, y, crate::render::raster::DARK);
                }
            }
            Ok(buf)
        }
    }

    #[test]
    fn test_overhang_kept_while_paper_remains() {
        let buf = render_line(&OverhangFont, &StyledLine::new("HELLO", 24.0), 384).unwrap();
        let b = buf.dark_bounds(128).unwrap();
        assert_eq!((b.left, b.right), (0, 60 + OVERHANG));

        let line = StyledLine::new("HELLO", 24.0).align(Alignment::Center);
        let b = render_line(&OverhangFont, &line, 384)
            .unwrap()
            .dark_bounds(128)
            .unwrap();
        assert_eq!((b.left, b.right), (162, 162 + 60 + OVERHANG));

        // Right-aligned text has no paper left for the overhang
        let line = StyledLine::new("HELLO", 24.0).align(Alignment::Right);
        let b = render_line(&OverhangFont, &line, 384)
            .unwrap()
            .dark_bounds(128)
            .unwrap();
        assert_eq!(b.right, 384);
    }

    #[test]
    fn test_invalid_inputs() {
        let line = StyledLine::new("A", 0.0);
        assert!(matches!(
            render_line(&BlockFont, &line, 384),
            Err(BluberryError::Rasterization(_))
        ));
        let line = StyledLine::new("A", 24.0);
        assert!(matches!(
            render_line(&BlockFont, &line, 0),
            Err(BluberryError::Rasterization(_))
        ));
    }

    #[test]
    fn test_rasterizer_failure_propagates() {
        let result = render_line(&BrokenFont, &StyledLine::new("A", 24.0), 384);
        assert!(matches!(result, Err(BluberryError::Rasterization(_))));
    }
}
