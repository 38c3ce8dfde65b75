//! # Pipeline Facade
//!
//! One call from receipt text to printer bytes.
//!
//! ```text
//! text ──compose──▶ PixelBuffer ──pack──▶ PackedBitmap ──┬──▶ data bytes
//!                                                        ├──▶ hex text
//!                                                        └──▶ print job (init + raster + feed + cut)
//! ```
//!
//! Options are validated before any work starts. Each call is independent
//! and holds no state beyond its arguments, so one rasterizer can serve
//! several threads at once.
//!
//! ## Example
//!
//! ```
//! use bluberry::pipeline::parse_receipt_text_hex;
//! use bluberry::printer::RenderOptions;
//!
//! let hex = parse_receipt_text_hex("HELLO", &RenderOptions::default()).unwrap();
//! // 384 dots = 48 bytes per row, two hex digits per byte
//! assert_eq!(hex.len() % 96, 0);
//! ```

use crate::codec::hex::to_hex;
use crate::error::Result;
use crate::printer::config::RenderOptions;
use crate::protocol::{commands, graphics};
use crate::render::compose::compose;
use crate::render::font::{BitmapFont, TextRasterizer};
use crate::render::pack::{PackedBitmap, pack};

/// Render and pack receipt text with any rasterizer.
pub fn render_receipt(
    text: &str,
    options: &RenderOptions,
    rasterizer: &dyn TextRasterizer,
) -> Result<PackedBitmap> {
    options.validate()?;
    let buffer = compose(text, options, rasterizer)?;
    pack(&buffer, options.threshold, options.dithering)
}

/// Packed bitmap bytes for `text`, drawn with the built-in bitmap font.
pub fn parse_receipt_text(text: &str, options: &RenderOptions) -> Result<Vec<u8>> {
    Ok(render_receipt(text, options, &BitmapFont::new())?.data)
}

/// Hex form of [`parse_receipt_text`], in `options.hex_case`.
pub fn parse_receipt_text_hex(text: &str, options: &RenderOptions) -> Result<String> {
    let data = parse_receipt_text(text, options)?;
    Ok(to_hex(&data, options.hex_case))
}

/// Wrap a packed bitmap in a complete job for `options.command_set`:
/// init, raster chunks, feed, then a cut when enabled.
pub fn print_job(bitmap: &PackedBitmap, options: &RenderOptions) -> Result<Vec<u8>> {
    options.validate()?;
    let set = options.command_set;

    let mut job = commands::init();
    for chunk in graphics::raster_chunks(set, bitmap, options.max_chunk_rows)? {
        job.extend(chunk);
    }
    job.extend(commands::feed(set, options.feed_dots));
    if options.cut {
        job.extend(commands::cut(set));
    }

    log::debug!(
        "{:?} print job: {} bytes for {}x{} dots",
        set,
        job.len(),
        bitmap.width_dots,
        bitmap.height_rows
    );
    Ok(job)
}

/// A rasterizer bound to a set of options.
///
/// ```
/// use bluberry::pipeline::Pipeline;
/// use bluberry::printer::{PrinterConfig, RenderOptions};
/// use bluberry::render::font::BitmapFont;
///
/// let options = RenderOptions::for_printer(&PrinterConfig::PAPER_80MM);
/// let pipeline = Pipeline::new(BitmapFont::new(), options).unwrap();
/// let bitmap = pipeline.bitmap("<center><b>TOTAL 16,500").unwrap();
/// assert_eq!(bitmap.width_bytes, 72);
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline<R: TextRasterizer> {
    rasterizer: R,
    options: RenderOptions,
}

impl<R: TextRasterizer> Pipeline<R> {
    /// Fails with a configuration error when `options` are invalid.
    pub fn new(rasterizer: R, options: RenderOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            rasterizer,
            options,
        })
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    pub fn bitmap(&self, text: &str) -> Result<PackedBitmap> {
        render_receipt(text, &self.options, &self.rasterizer)
    }

    pub fn bytes(&self, text: &str) -> Result<Vec<u8>> {
        Ok(self.bitmap(text)?.data)
    }

    pub fn hex(&self, text: &str) -> Result<String> {
        Ok(to_hex(&self.bytes(text)?, self.options.hex_case))
    }

    /// Full printer job for `text`.
    pub fn print_job(&self, text: &str) -> Result<Vec<u8>> {
        print_job(&self.bitmap(text)?, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::hex::{HexCase, from_hex};
    use crate::error::BluberryError;
    use crate::protocol::graphics::CommandSet;
    use crate::render::font::testing::{BlockFont, BrokenFont};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hello_block_font() {
        let bitmap = render_receipt("HELLO", &RenderOptions::default(), &BlockFont).unwrap();
        assert_eq!(bitmap.width_bytes, 48);
        assert_eq!(bitmap.height_rows, 24);
        // 5 chars * 12 dots = 60 dark columns = 7 full bytes + 4 bits
        let row = bitmap.row(0);
        assert!(row[..7].iter().all(|&b| b == 0xFF));
        assert_eq!(row[7], 0xF0);
        assert!(row[8..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_hex_matches_bytes() {
        let options = RenderOptions::default();
        let bytes = parse_receipt_text("HELLO", &options).unwrap();
        let hex = parse_receipt_text_hex("HELLO", &options).unwrap();
        assert_eq!(hex.len(), bytes.len() * 2);
        assert_eq!(from_hex(&hex).unwrap(), bytes);
        assert!(!hex.chars().any(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_lowercase_hex() {
        let options = RenderOptions {
            hex_case: HexCase::Lower,
            ..RenderOptions::default()
        };
        let hex = parse_receipt_text_hex("HELLO", &options).unwrap();
        assert!(!hex.chars().any(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_invalid_options_fail_first() {
        let options = RenderOptions {
            paper_width_dots: 0,
            ..RenderOptions::default()
        };
        // Even a broken font is never reached
        assert!(matches!(
            render_receipt("x", &options, &BrokenFont),
            Err(BluberryError::Configuration(_))
        ));
        assert!(matches!(
            Pipeline::new(BlockFont, options),
            Err(BluberryError::Configuration(_))
        ));
    }

    #[test]
    fn test_rasterizer_errors_surface() {
        assert!(matches!(
            render_receipt("x", &RenderOptions::default(), &BrokenFont),
            Err(BluberryError::Rasterization(_))
        ));
    }

    #[test]
    fn test_esc_pos_job_layout() {
        let options = RenderOptions::default();
        let bitmap = render_receipt("A", &options, &BlockFont).unwrap();
        let job = print_job(&bitmap, &options).unwrap();

        assert_eq!(&job[..2], &[0x1B, 0x40]);
        assert_eq!(&job[2..10], &[0x1D, 0x76, 0x30, 0x00, 48, 0, 24, 0]);
        assert_eq!(&job[10..10 + bitmap.data.len()], &bitmap.data[..]);
        let tail = &job[10 + bitmap.data.len()..];
        assert_eq!(tail, &[0x1B, 0x4A, 96, 0x1D, 0x56, 0x00]);
    }

    #[test]
    fn test_star_job_without_cut() {
        let options = RenderOptions {
            command_set: CommandSet::StarPrnt,
            cut: false,
            feed_dots: 0,
            ..RenderOptions::default()
        };
        let bitmap = render_receipt("A", &options, &BlockFont).unwrap();
        let job = print_job(&bitmap, &options).unwrap();
        assert_eq!(&job[2..5], &[0x1B, 0x1D, 0x53]);
        assert_eq!(job.len(), 2 + 9 + bitmap.data.len());
    }

    #[test]
    fn test_job_chunks_tall_receipts() {
        let options = RenderOptions {
            max_chunk_rows: 24,
            ..RenderOptions::default()
        };
        let pipeline = Pipeline::new(BlockFont, options).unwrap();
        let job = pipeline.print_job("a\nb\nc").unwrap();
        let headers = job
            .windows(4)
            .filter(|w| *w == [0x1D, 0x76, 0x30, 0x00])
            .count();
        assert_eq!(headers, 3);
    }

    #[test]
    fn test_pipeline_methods_agree() {
        let pipeline = Pipeline::new(BlockFont, RenderOptions::default()).unwrap();
        let bytes = pipeline.bytes("Total").unwrap();
        assert_eq!(pipeline.bitmap("Total").unwrap().data, bytes);
        assert_eq!(from_hex(&pipeline.hex("Total").unwrap()).unwrap(), bytes);
    }
}
