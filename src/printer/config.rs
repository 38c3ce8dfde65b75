//! # Printer Configuration
//!
//! Hardware presets for common receipt paper widths, plus the
//! [`RenderOptions`] that drive one pipeline invocation.
//!
//! ## Paper Presets
//!
//! | Preset | Paper | Width (dots) | Width (bytes) |
//! |--------|-------|--------------|---------------|
//! | `PAPER_58MM` | 58mm | 384 | 48 |
//! | `PAPER_80MM` | 80mm | 576 | 72 |
//!
//! ## Usage
//!
//! ```
//! use bluberry::printer::{PrinterConfig, RenderOptions};
//!
//! let config = PrinterConfig::PAPER_80MM;
//! let options = RenderOptions::for_printer(&config);
//! assert_eq!(options.paper_width_dots, 576);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::codec::hex::HexCase;
use crate::error::{BluberryError, Result};
use crate::protocol::graphics::CommandSet;
use crate::render::dither::Dithering;
use crate::render::font::MAX_FONT_SIZE;

/// Largest width the raster envelopes can describe (`xL xH` is a u16 byte count).
pub const MAX_PAPER_WIDTH_DOTS: usize = u16::MAX as usize;

/// # Printer Configuration
///
/// Print head width and the Bluetooth chunking limit of one paper size.
#[derive(Debug, Clone, Copy)]
pub struct PrinterConfig {
    /// Maximum print width in dots (pixels)
    pub width_dots: u16,

    /// Maximum rows per raster command (for Bluetooth buffer limits)
    pub max_chunk_rows: u16,
}

impl PrinterConfig {
    /// 58mm roll, the common handheld Bluetooth receipt printer.
    pub const PAPER_58MM: Self = Self {
        width_dots: 384,
        max_chunk_rows: 256,
    };

    /// 80mm roll, the common countertop receipt printer.
    pub const PAPER_80MM: Self = Self {
        width_dots: 576,
        max_chunk_rows: 256,
    };

    /// Look up a preset by name (`"58mm"`, `"80mm"`, case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "58mm" | "58" => Some(Self::PAPER_58MM),
            "80mm" | "80" => Some(Self::PAPER_80MM),
            _ => None,
        }
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::PAPER_58MM
    }
}

// ============================================================================
// RENDER OPTIONS
// ============================================================================

/// Options for one pipeline invocation.
///
/// Every field has a default, so a JSON config file only needs the keys it
/// wants to change:
///
/// ```json
/// { "paper_width_dots": 576, "threshold": 100, "hex_case": "lower" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Paper width in dots; every rendered line is exactly this wide.
    pub paper_width_dots: usize,
    /// Font size in pixels for lines without a size directive.
    pub default_font_size: f32,
    /// Darkness cutoff: a pixel at or above this value prints.
    pub threshold: u8,
    /// Case of the hex payload.
    pub hex_case: HexCase,
    /// Grayscale → 1-bit conversion.
    pub dithering: Dithering,
    /// Word-wrap lines wider than the paper instead of clipping them.
    pub wrap: bool,
    /// Vendor command set used by [`crate::pipeline::print_job`].
    pub command_set: CommandSet,
    /// Paper feed after the image, in dots (ESC J units).
    pub feed_dots: u16,
    /// Cut the paper at the end of a print job.
    pub cut: bool,
    /// Maximum rows per raster command in a print job.
    pub max_chunk_rows: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::for_printer(&PrinterConfig::default())
    }
}

impl RenderOptions {
    /// Default options sized for a printer preset.
    pub fn for_printer(config: &PrinterConfig) -> Self {
        Self {
            paper_width_dots: config.width_dots as usize,
            default_font_size: 24.0,
            threshold: 128,
            hex_case: HexCase::Upper,
            dithering: Dithering::Threshold,
            wrap: false,
            command_set: CommandSet::EscPos,
            feed_dots: 96,
            cut: true,
            max_chunk_rows: config.max_chunk_rows as usize,
        }
    }

    /// Load options from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            BluberryError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    /// Parse options from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(raw)
            .map_err(|e| BluberryError::Configuration(format!("Invalid options JSON: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Reject options no printer could honour.
    pub fn validate(&self) -> Result<()> {
        if self.paper_width_dots == 0 {
            return Err(BluberryError::Configuration(
                "paper_width_dots must be positive".to_string(),
            ));
        }
        if self.paper_width_dots > MAX_PAPER_WIDTH_DOTS {
            return Err(BluberryError::Configuration(format!(
                "paper_width_dots {} exceeds the raster limit of {}",
                self.paper_width_dots, MAX_PAPER_WIDTH_DOTS
            )));
        }
        if !self.default_font_size.is_finite()
            || self.default_font_size <= 0.0
            || self.default_font_size > MAX_FONT_SIZE
        {
            return Err(BluberryError::Configuration(format!(
                "default_font_size must be in (0, {}], got {}",
                MAX_FONT_SIZE, self.default_font_size
            )));
        }
        // threshold 0 would classify blank paper as ink
        if self.threshold == 0 {
            return Err(BluberryError::Configuration(
                "threshold must be in 1..=255".to_string(),
            ));
        }
        if self.max_chunk_rows == 0 {
            return Err(BluberryError::Configuration(
                "max_chunk_rows must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_preset_dimensions() {
        assert_eq!(PrinterConfig::PAPER_58MM.width_dots, 384);
        assert_eq!(PrinterConfig::PAPER_80MM.width_dots, 576);
    }

    #[test]
    fn test_by_name() {
        assert_eq!(PrinterConfig::by_name("80MM").map(|c| c.width_dots), Some(576));
        assert_eq!(PrinterConfig::by_name("58").map(|c| c.width_dots), Some(384));
        assert!(PrinterConfig::by_name("110mm").is_none());
    }

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert_eq!(options.paper_width_dots, 384);
        assert_eq!(options.threshold, 128);
        assert_eq!(options.hex_case, HexCase::Upper);
        assert_eq!(options.dithering, Dithering::Threshold);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_width() {
        let options = RenderOptions {
            paper_width_dots: 0,
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(BluberryError::Configuration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_threshold() {
        let options = RenderOptions {
            threshold: 0,
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(BluberryError::Configuration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_font_size() {
        for size in [0.0, -4.0, f32::NAN, 1e9, 1e20] {
            let options = RenderOptions {
                default_font_size: size,
                ..Default::default()
            };
            assert!(options.validate().is_err(), "size {} accepted", size);
        }
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options =
            RenderOptions::from_json(r#"{"paper_width_dots": 576, "hex_case": "lower"}"#).unwrap();
        assert_eq!(options.paper_width_dots, 576);
        assert_eq!(options.hex_case, HexCase::Lower);
        assert_eq!(options.threshold, 128);
        assert_eq!(options.default_font_size, 24.0);
    }

    #[test]
    fn test_json_out_of_range_threshold() {
        let result = RenderOptions::from_json(r#"{"threshold": 300}"#);
        assert!(matches!(result, Err(BluberryError::Configuration(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = RenderOptions::from_json_file("/nonexistent/bluberry.json");
        assert!(matches!(result, Err(BluberryError::Configuration(_))));
    }
}
