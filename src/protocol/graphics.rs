//! # Raster Graphics Commands
//!
//! Wraps packed 1-bit rows in the raster command of a printer family.
//!
//! ## Command Sets
//!
//! | Set | Command | Header |
//! |-----|---------|--------|
//! | ESC/POS | `GS v 0` | `1D 76 30 m xL xH yL yH` |
//! | StarPRNT | `ESC GS S` | `1B 1D 53 1 xL xH yL yH n` |
//!
//! In both, `x` is the row length in **bytes** and `y` the number of rows,
//! little-endian. Data follows the header row by row:
//!
//! ```text
//! Row 0:    d[0]      d[1]       ... d[xb-1]
//! Row 1:    d[xb]     d[xb+1]    ... d[2*xb-1]
//! ...
//! ```
//!
//! Bit 7 of each byte is the leftmost dot, 1 = print:
//!
//! ```text
//! 0xF0 = 11110000 = ████░░░░
//! 0xAA = 10101010 = █░█░█░█░
//! ```
//!
//! ## Chunking
//!
//! Bluetooth printers have small receive buffers, and both headers cap the
//! height at 65535 rows. [`raster_chunks`] splits a tall image into several
//! commands of at most `max_rows` rows each; printed back to back they are
//! indistinguishable from one image.

use serde::{Deserialize, Serialize};

use super::commands::{ESC, GS, u16_le};
use crate::error::{BluberryError, Result};
use crate::render::pack::PackedBitmap;

/// Printer command family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandSet {
    /// Epson-compatible printers, including most Bluetooth receipt printers.
    #[default]
    EscPos,
    /// Star Micronics printers in StarPRNT mode.
    StarPrnt,
}

impl std::str::FromStr for CommandSet {
    type Err = BluberryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "escpos" | "esc_pos" | "esc-pos" => Ok(CommandSet::EscPos),
            "star" | "starprnt" | "star_prnt" => Ok(CommandSet::StarPrnt),
            other => Err(BluberryError::Configuration(format!(
                "unknown command set '{}'",
                other
            ))),
        }
    }
}

/// Header size of one raster command, shared by both sets.
pub fn header_len(set: CommandSet) -> usize {
    match set {
        CommandSet::EscPos => 8,
        CommandSet::StarPrnt => 9,
    }
}

/// # Print Raster Image (GS v 0)
///
/// ```
/// use bluberry::protocol::graphics::gs_v0_raster;
///
/// let cmd = gs_v0_raster(48, 2, &[0u8; 96]);
/// assert_eq!(&cmd[..8], &[0x1D, 0x76, 0x30, 0x00, 48, 0, 2, 0]);
/// assert_eq!(cmd.len(), 8 + 96);
/// ```
pub fn gs_v0_raster(width_bytes: u16, height: u16, data: &[u8]) -> Vec<u8> {
    debug_assert_eq!(data.len(), width_bytes as usize * height as usize);

    let [xl, xh] = u16_le(width_bytes);
    let [yl, yh] = u16_le(height);

    let mut cmd = Vec::with_capacity(8 + data.len());
    cmd.extend_from_slice(&[GS, b'v', b'0', 0, xl, xh, yl, yh]); // m = 0 (normal density)
    cmd.extend_from_slice(data);
    cmd
}

/// # Raster Graphics (ESC GS S)
///
/// StarPRNT's arbitrary-height monochrome raster.
///
/// ```
/// use bluberry::protocol::graphics::star_raster;
///
/// let cmd = star_raster(72, 100, &vec![0xAA; 72 * 100]);
/// assert_eq!(&cmd[..9], &[0x1B, 0x1D, 0x53, 1, 72, 0, 100, 0, 0]);
/// ```
pub fn star_raster(width_bytes: u16, height: u16, data: &[u8]) -> Vec<u8> {
    debug_assert_eq!(data.len(), width_bytes as usize * height as usize);

    let [xl, xh] = u16_le(width_bytes);
    let [yl, yh] = u16_le(height);

    let mut cmd = Vec::with_capacity(9 + data.len());
    cmd.extend_from_slice(&[ESC, GS, b'S', 1, xl, xh, yl, yh, 0]); // m = monochrome, n = black
    cmd.extend_from_slice(data);
    cmd
}

/// Raster command for `set`.
pub fn raster(set: CommandSet, width_bytes: u16, height: u16, data: &[u8]) -> Vec<u8> {
    match set {
        CommandSet::EscPos => gs_v0_raster(width_bytes, height, data),
        CommandSet::StarPrnt => star_raster(width_bytes, height, data),
    }
}

/// Split `bitmap` into raster commands of at most `max_rows` rows.
///
/// Fails with [`BluberryError::Format`] when the bitmap is empty, its data
/// length is not `width_bytes * height_rows`, or the row width does not fit
/// the header's 16-bit field. Fails with [`BluberryError::Configuration`]
/// when `max_rows` is zero.
pub fn raster_chunks(set: CommandSet, bitmap: &PackedBitmap, max_rows: usize) -> Result<Vec<Vec<u8>>> {
    if max_rows == 0 {
        return Err(BluberryError::Configuration(
            "max_chunk_rows must be positive".to_string(),
        ));
    }
    if bitmap.width_bytes == 0 || bitmap.height_rows == 0 {
        return Err(BluberryError::Format(format!(
            "cannot print an empty {}x{} byte bitmap",
            bitmap.width_bytes, bitmap.height_rows
        )));
    }
    let expected = bitmap.width_bytes.checked_mul(bitmap.height_rows);
    if expected != Some(bitmap.data.len()) {
        return Err(BluberryError::Format(format!(
            "bitmap holds {} bytes, expected {} rows of {}",
            bitmap.data.len(),
            bitmap.height_rows,
            bitmap.width_bytes
        )));
    }
    let width_bytes = u16::try_from(bitmap.width_bytes).map_err(|_| {
        BluberryError::Format(format!(
            "{} bytes per row exceeds the raster header limit",
            bitmap.width_bytes
        ))
    })?;
    let rows_per_chunk = max_rows.min(u16::MAX as usize);

    let chunks: Vec<Vec<u8>> = bitmap
        .data
        .chunks(bitmap.width_bytes * rows_per_chunk)
        .map(|chunk| {
            let rows = (chunk.len() / bitmap.width_bytes) as u16;
            raster(set, width_bytes, rows, chunk)
        })
        .collect();

    log::debug!(
        "{:?} raster: {} rows in {} chunk(s) of up to {}",
        set,
        bitmap.height_rows,
        chunks.len(),
        rows_per_chunk
    );
    Ok(chunks)
}
