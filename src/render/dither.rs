//! # Binarization
//!
//! Decides, for every pixel of a composited receipt, whether the print
//! head burns a dot. Input is darkness (0 = paper, 255 = full ink), output
//! is one `bool` per pixel and then packed bytes.
//!
//! ## Methods
//!
//! | Method | Rule | Good for |
//! |--------|------|----------|
//! | Threshold | `darkness >= threshold` | text (default) |
//! | Bayer | 8x8 ordered matrix | gray fills, logos |
//! | Floyd-Steinberg | error diffusion, 4 neighbours | photos |
//! | Atkinson | error diffusion, 3/4 of the error over 6 neighbours | high-contrast art |
//!
//! Text rendered by the line rasterizer is nearly binary already, so the
//! plain threshold is what receipts normally use. The other methods only
//! differ on anti-aliased edges.
//!
//! ## The Bayer Matrix
//!
//! ```text
//!     0   1   2   3   4   5   6   7   (x mod 8)
//!   ┌───┬───┬───┬───┬───┬───┬───┬───┐
//! 0 │ 0 │32 │ 8 │40 │ 2 │34 │10 │42 │
//! 1 │48 │16 │56 │24 │50 │18 │58 │26 │
//! 2 │12 │44 │ 4 │36 │14 │46 │ 6 │38 │
//! 3 │60 │28 │52 │20 │62 │30 │54 │22 │
//! 4 │ 3 │35 │11 │43 │ 1 │33 │ 9 │41 │
//! 5 │51 │19 │59 │27 │49 │17 │57 │25 │
//! 6 │15 │47 │ 7 │39 │13 │45 │ 5 │37 │
//! 7 │63 │31 │55 │23 │61 │29 │53 │21 │
//!   └───┴───┴───┴───┴───┴───┴───┴───┘
//! ```
//!
//! Cell values map to `(value + 0.5) / 64`, so full ink always prints and
//! bare paper never does.
//!
//! ## Example
//!
//! ```
//! use bluberry::render::dither::pack_row;
//!
//! let row = vec![true, true, false, false, true, false, true, false];
//! assert_eq!(pack_row(&row), vec![0b11001010]);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BluberryError;
use crate::render::raster::PixelBuffer;

/// How grayscale darkness becomes dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dithering {
    #[default]
    Threshold,
    Bayer,
    FloydSteinberg,
    Atkinson,
}

impl FromStr for Dithering {
    type Err = BluberryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "threshold" | "none" => Ok(Dithering::Threshold),
            "bayer" => Ok(Dithering::Bayer),
            "floyd-steinberg" | "floyd_steinberg" | "fs" => Ok(Dithering::FloydSteinberg),
            "atkinson" => Ok(Dithering::Atkinson),
            other => Err(BluberryError::Configuration(format!(
                "unknown dithering method '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Dithering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dithering::Threshold => "threshold",
            Dithering::Bayer => "bayer",
            Dithering::FloydSteinberg => "floyd-steinberg",
            Dithering::Atkinson => "atkinson",
        };
        f.write_str(name)
    }
}

/// Bayer 8x8 dithering matrix. Holds every value 0-63 once.
pub const BAYER8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Ordered-dither threshold at `(x, y)`, strictly inside (0, 1).
#[inline]
pub fn bayer_threshold(x: usize, y: usize) -> f32 {
    (BAYER8[y & 7][x & 7] as f32 + 0.5) / 64.0
}

/// Turn a darkness buffer into a row-major dot mask.
///
/// `threshold` drives [`Dithering::Threshold`] and is the quantization
/// point of the error-diffusion methods. Bayer uses its own matrix.
pub fn binarize(buffer: &PixelBuffer, threshold: u8, method: Dithering) -> Vec<bool> {
    match method {
        Dithering::Threshold => buffer.pixels().iter().map(|&d| d >= threshold).collect(),
        Dithering::Bayer => {
            let width = buffer.width();
            buffer
                .pixels()
                .iter()
                .enumerate()
                .map(|(i, &d)| d as f32 / 255.0 > bayer_threshold(i % width, i / width))
                .collect()
        }
        Dithering::FloydSteinberg => diffuse(
            buffer,
            threshold,
            &[(1, 0, 7), (-1, 1, 3), (0, 1, 5), (1, 1, 1)],
            16,
        ),
        Dithering::Atkinson => diffuse(
            buffer,
            threshold,
            &[(1, 0, 1), (2, 0, 1), (-1, 1, 1), (0, 1, 1), (1, 1, 1), (0, 2, 1)],
            8,
        ),
    }
}

/// Error diffusion over darkness values. Each kernel entry is
/// `(dx, dy, weight)`; the error share is `weight / divisor`.
fn diffuse(
    buffer: &PixelBuffer,
    threshold: u8,
    kernel: &[(isize, usize, i32)],
    divisor: i32,
) -> Vec<bool> {
    let width = buffer.width();
    let height = buffer.height();
    let mut work: Vec<i32> = buffer.pixels().iter().map(|&d| d as i32).collect();
    let mut out = vec![false; work.len()];
    let threshold = threshold as i32;

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let old = work[idx].clamp(0, 255);
            let dark = old >= threshold;
            out[idx] = dark;
            let error = old - if dark { 255 } else { 0 };
            if error == 0 {
                continue;
            }

            for &(dx, dy, weight) in kernel {
                let Some(nx) = x.checked_add_signed(dx) else {
                    continue;
                };
                let ny = y + dy;
                if nx >= width || ny >= height {
                    continue;
                }
                work[ny * width + nx] += error * weight / divisor;
            }
        }
    }
    out
}

/// Pack a row of dots into bytes.
///
/// Bit 7 of the first byte is the leftmost dot, 1 = print. A row that is
/// not a multiple of 8 wide is padded with zero bits on the right.
///
/// ```
/// use bluberry::render::dither::pack_row;
///
/// assert_eq!(pack_row(&[true; 12]), vec![0xFF, 0xF0]);
/// ```
pub fn pack_row(dots: &[bool]) -> Vec<u8> {
    let mut bytes = vec![0u8; dots.len().div_ceil(8)];
    for (i, _) in dots.iter().enumerate().filter(|(_, dot)| **dot) {
        bytes[i / 8] |= 0x80 >> (i % 8);
    }
    bytes
}
