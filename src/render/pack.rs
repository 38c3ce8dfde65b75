//! # Monochrome Packing
//!
//! Converts a composited [`PixelBuffer`] into the printer's 1-bit layout.
//!
//! ```text
//! dots:   x=0 x=1 ... x=7 | x=8 ...           x=w-1 | pad
//! bytes:  [b7 b6 ...  b0] | [b7 ...] ... [b7 .. bk 0 0]
//! ```
//!
//! Rows are `width_bytes = ceil(width / 8)` long and stored top to bottom
//! with no gaps. Bit 7 is the leftmost dot, 1 = print. Padding bits past
//! the right edge are always 0.

use image::{GrayImage, ImageEncoder, Luma};

use crate::error::{BluberryError, Result};
use crate::render::dither::{Dithering, binarize, pack_row};
use crate::render::raster::PixelBuffer;

/// A 1bpp image ready for a raster command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBitmap {
    pub width_dots: usize,
    pub width_bytes: usize,
    pub height_rows: usize,
    /// `width_bytes * height_rows` bytes, row-major.
    pub data: Vec<u8>,
}

impl PackedBitmap {
    /// Bytes of row `y`.
    pub fn row(&self, y: usize) -> &[u8] {
        &self.data[y * self.width_bytes..(y + 1) * self.width_bytes]
    }

    /// Whether the dot at `(x, y)` prints.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        if x >= self.width_dots || y >= self.height_rows {
            return false;
        }
        self.data[y * self.width_bytes + x / 8] & (0x80 >> (x % 8)) != 0
    }

    /// Black-on-white preview of exactly what the printer will burn.
    pub fn to_gray_image(&self) -> GrayImage {
        let mut img = GrayImage::new(self.width_dots as u32, self.height_rows as u32);
        for y in 0..self.height_rows {
            for x in 0..self.width_dots {
                let color = if self.is_dark(x, y) { 0u8 } else { 255u8 };
                img.put_pixel(x as u32, y as u32, Luma([color]));
            }
        }
        img
    }

    /// Encode the preview as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let img = self.to_gray_image();
        let mut png_bytes = Vec::new();
        image::codecs::png::PngEncoder::new(&mut png_bytes)
            .write_image(
                img.as_raw(),
                img.width(),
                img.height(),
                image::ExtendedColorType::L8,
            )
            .map_err(|e| BluberryError::Image(format!("Failed to encode PNG: {}", e)))?;
        Ok(png_bytes)
    }
}

/// Pack `buffer` into rows of bits.
///
/// Fails with [`BluberryError::Format`] when the buffer has no width or
/// no height.
pub fn pack(buffer: &PixelBuffer, threshold: u8, dithering: Dithering) -> Result<PackedBitmap> {
    let width = buffer.width();
    let height = buffer.height();
    if width == 0 || height == 0 {
        return Err(BluberryError::Format(format!(
            "cannot pack an empty {}x{} buffer",
            width, height
        )));
    }

    let dots = binarize(buffer, threshold, dithering);
    let width_bytes = width.div_ceil(8);
    let mut data = Vec::with_capacity(width_bytes * height);
    for row in dots.chunks(width) {
        data.extend(pack_row(row));
    }

    log::debug!(
        "packed {}x{} ({} bytes/row, {}) into {} bytes",
        width,
        height,
        width_bytes,
        dithering,
        data.len()
    );

    Ok(PackedBitmap {
        width_dots: width,
        width_bytes,
        height_rows: height,
        data,
    })
}
