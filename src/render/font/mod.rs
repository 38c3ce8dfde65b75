//! # Text Rasterizers
//!
//! The pipeline never touches glyph outlines or font files directly. It asks
//! a [`TextRasterizer`] three questions:
//!
//! - how wide is this text? ([`TextRasterizer::measure`])
//! - how tall is one line? ([`TextRasterizer::line_height`])
//! - draw this text into a buffer of this size ([`TextRasterizer::rasterize`])
//!
//! Two implementations ship with the crate:
//!
//! | Rasterizer | Source | Scripts | Notes |
//! |------------|--------|---------|-------|
//! | [`BitmapFont`] | Spleen (embedded) | Latin, box drawing | Crisp, no anti-aliasing, no files needed |
//! | [`TtfFont`] | any TTF/OTF via ab_glyph | whatever the font covers | Anti-aliased coverage, optional bold face |
//!
//! Bold without a dedicated face is synthesized by smearing each row one
//! dot to the right, which widens the measured text by one dot.

mod bitmap;
mod ttf;

pub use bitmap::BitmapFont;
pub use ttf::TtfFont;

use crate::error::{BluberryError, Result};
use crate::render::raster::PixelBuffer;

/// Renders glyph rasters for the line rasterizer.
///
/// Implementations must be deterministic: the same arguments always give
/// the same pixels. They are shared read-only between concurrent pipeline
/// invocations, hence `Send + Sync`.
pub trait TextRasterizer: Send + Sync {
    /// Width in dots of `text` rendered at `font_size`.
    fn measure(&self, text: &str, font_size: f32, bold: bool) -> Result<usize>;

    /// Height in dots of one rendered line.
    fn line_height(&self, font_size: f32, bold: bool) -> Result<usize>;

    /// Draw `text` starting at x = 0 into a `width × height` buffer.
    /// Glyphs that do not fit are clipped.
    fn rasterize(
        &self,
        text: &str,
        font_size: f32,
        bold: bool,
        width: usize,
        height: usize,
    ) -> Result<PixelBuffer>;
}

impl<T: TextRasterizer + ?Sized> TextRasterizer for Box<T> {
    fn measure(&self, text: &str, font_size: f32, bold: bool) -> Result<usize> {
        (**self).measure(text, font_size, bold)
    }

    fn line_height(&self, font_size: f32, bold: bool) -> Result<usize> {
        (**self).line_height(font_size, bold)
    }

    fn rasterize(
        &self,
        text: &str,
        font_size: f32,
        bold: bool,
        width: usize,
        height: usize,
    ) -> Result<PixelBuffer> {
        (**self).rasterize(text, font_size, bold, width, height)
    }
}

/// Largest font size in pixels any rasterizer accepts.
///
/// Keeps one line's buffer and glyph scaling bounded no matter what a
/// `<size=N>` tag asks for.
pub const MAX_FONT_SIZE: f32 = 512.0;

/// Reject sizes no font can render.
pub fn check_font_size(font_size: f32) -> Result<()> {
    if !font_size.is_finite() || font_size <= 0.0 {
        return Err(BluberryError::Rasterization(format!(
            "font size must be a positive number, got {}",
            font_size
        )));
    }
    if font_size > MAX_FONT_SIZE {
        return Err(BluberryError::Rasterization(format!(
            "font size {} exceeds the maximum of {}",
            font_size, MAX_FONT_SIZE
        )));
    }
    Ok(())
}

/// Synthetic bold: every dark pixel also darkens its right neighbour.
///
/// Walks each row right-to-left so a pixel only ever sees the original
/// value of its left neighbour.
pub(crate) fn embolden(buf: &mut PixelBuffer) {
    for y in 0..buf.height() {
        for x in (1..buf.width()).rev() {
            let left = buf.get(x - 1, y);
            if left > buf.get(x, y) {
                buf.set(x, y, left);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Deterministic block font: every non-space character is a solid
    //! `size/2 × size` rectangle, so alignment can be checked to the dot.

    use super::*;
    use crate::render::raster::DARK;

    pub struct BlockFont;

    impl BlockFont {
        fn cell_width(font_size: f32) -> usize {
            ((font_size / 2.0).round() as usize).max(1)
        }
    }

    impl TextRasterizer for BlockFont {
        fn measure(&self, text: &str, font_size: f32, _bold: bool) -> Result<usize> {
            check_font_size(font_size)?;
            Ok(text.chars().count() * Self::cell_width(font_size))
        }

        fn line_height(&self, font_size: f32, _bold: bool) -> Result<usize> {
            check_font_size(font_size)?;
            Ok(font_size.round() as usize)
        }

        fn rasterize(
            &self,
            text: &str,
            font_size: f32,
            _bold: bool,
            width: usize,
            height: usize,
        ) -> Result<PixelBuffer> {
            check_font_size(font_size)?;
            let cell = Self::cell_width(font_size);
            let mut buf = PixelBuffer::new(width, height);
            for (i, ch) in text.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                for y in 0..height {
                    for x in i * cell..(i + 1) * cell {
                        buf.set(x, y, DARK);
                    }
                }
            }
            Ok(buf)
        }
    }

    /// Rasterizer that fails every call, for all-or-nothing tests.
    pub struct BrokenFont;

    impl TextRasterizer for BrokenFont {
        fn measure(&self, _text: &str, _font_size: f32, _bold: bool) -> Result<usize> {
            Err(BluberryError::Rasterization("font unavailable".to_string()))
        }

        fn line_height(&self, _font_size: f32, _bold: bool) -> Result<usize> {
            Err(BluberryError::Rasterization("font unavailable".to_string()))
        }

        fn rasterize(
            &self,
            _text: &str,
            _font_size: f32,
            _bold: bool,
            _width: usize,
            _height: usize,
        ) -> Result<PixelBuffer> {
            Err(BluberryError::Rasterization("font unavailable".to_string()))
        }
    }
}
