//! # Pixel Buffers
//!
//! [`PixelBuffer`] is the grayscale surface every rendering stage produces
//! and consumes. Pixels are row-major darkness values:
//!
//! ```text
//!   0 ░ paper (light)
//! 128 ▒ half coverage
//! 255 █ full ink (dark)
//! ```
//!
//! Storing darkness rather than luminance means "more ink" is always "a
//! larger number", which keeps the threshold rule in the packer a single
//! comparison.

use crate::error::{BluberryError, Result};

/// Darkness of blank paper.
pub const LIGHT: u8 = 0;
/// Darkness of full glyph coverage.
pub const DARK: u8 = 255;

/// Row-major grayscale buffer. `pixels.len() == width * height` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

/// Inclusive-exclusive bounding box of the dark pixels in a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DarkBounds {
    pub left: usize,
    pub top: usize,
    /// One past the rightmost dark column.
    pub right: usize,
    /// One past the bottom dark row.
    pub bottom: usize,
}

impl PixelBuffer {
    /// Blank (all light) buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![LIGHT; width * height],
        }
    }

    /// Wrap existing pixels, checking the length invariant.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(BluberryError::Format(format!(
                "Pixel data length mismatch: expected {} ({}x{}), got {}",
                width * height,
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the buffer, returning the raw pixels.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Darkness at (x, y). Out-of-range reads return [`LIGHT`].
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            LIGHT
        }
    }

    /// Set darkness at (x, y). Out-of-range writes are clipped.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = value;
        }
    }

    /// Accumulate coverage at (x, y), saturating at [`DARK`]. Used when
    /// overlapping glyph outlines touch the same pixel.
    #[inline]
    pub fn darken(&mut self, x: usize, y: usize, value: u8) {
        if x < self.width && y < self.height {
            let idx = y * self.width + x;
            self.pixels[idx] = self.pixels[idx].saturating_add(value);
        }
    }

    /// One row of pixels.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// Copy `src` into this buffer with its top-left corner at (x, y).
    /// Anything falling outside this buffer is clipped.
    pub fn blit(&mut self, src: &PixelBuffer, x: usize, y: usize) {
        if x >= self.width || y >= self.height {
            return;
        }
        let copy_w = src.width.min(self.width - x);
        let copy_h = src.height.min(self.height - y);
        for row in 0..copy_h {
            let dst_start = (y + row) * self.width + x;
            let src_start = row * src.width;
            self.pixels[dst_start..dst_start + copy_w]
                .copy_from_slice(&src.pixels[src_start..src_start + copy_w]);
        }
    }

    /// Append `below` underneath this buffer. Widths must match.
    pub fn append_below(&mut self, below: PixelBuffer) -> Result<()> {
        if below.width != self.width {
            return Err(BluberryError::Format(format!(
                "Cannot stack a {}-dot line under a {}-dot receipt",
                below.width, self.width
            )));
        }
        self.height += below.height;
        self.pixels.extend(below.pixels);
        Ok(())
    }

    /// Stack buffers top-to-bottom. All buffers must share `width`.
    pub fn stack(width: usize, parts: impl IntoIterator<Item = PixelBuffer>) -> Result<Self> {
        let mut out = Self::new(width, 0);
        for part in parts {
            out.append_below(part)?;
        }
        Ok(out)
    }

    /// Bounding box of pixels at or above `threshold`, or `None` if the
    /// buffer has no such pixel.
    pub fn dark_bounds(&self, threshold: u8) -> Option<DarkBounds> {
        let mut bounds: Option<DarkBounds> = None;
        for y in 0..self.height {
            for (x, &value) in self.row(y).iter().enumerate() {
                if value < threshold {
                    continue;
                }
                let b = bounds.get_or_insert(DarkBounds {
                    left: x,
                    top: y,
                    right: x + 1,
                    bottom: y + 1,
                });
                b.left = b.left.min(x);
                b.right = b.right.max(x + 1);
                b.bottom = y + 1;
            }
        }
        bounds
    }

    /// Convert to an 8-bit luminance image (white paper, black ink).
    pub fn to_gray_image(&self) -> image::GrayImage {
        let luma: Vec<u8> = self.pixels.iter().map(|&d| DARK - d).collect();
        image::GrayImage::from_raw(self.width as u32, self.height as u32, luma)
            .unwrap_or_else(|| image::GrayImage::new(self.width as u32, self.height as u32))
    }
}
