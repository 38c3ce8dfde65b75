//! # Receipt Compositor
//!
//! Stacks rendered lines into one paper-wide buffer.
//!
//! ```text
//! text ──markup::parse──▶ [StyledLine] ──(wrap)──▶ render_line ×N ──stack──▶ PixelBuffer
//! ```
//!
//! The result is exactly `paper_width_dots` wide and as tall as the sum of
//! its line heights. A failure on any line fails the whole receipt.

use crate::error::Result;
use crate::printer::config::RenderOptions;
use crate::receipt::{markup, wrap};
use crate::render::font::TextRasterizer;
use crate::render::line::{StyledLine, render_line};
use crate::render::raster::PixelBuffer;

/// Parse `text` into the styled lines that will be drawn, applying word
/// wrap when enabled. Never empty: a receipt with no lines becomes one
/// blank line at the default size.
pub fn layout(
    text: &str,
    options: &RenderOptions,
    rasterizer: &dyn TextRasterizer,
) -> Result<Vec<StyledLine>> {
    let mut lines = markup::parse(text, options.default_font_size);
    if lines.is_empty() {
        lines.push(StyledLine::blank(options.default_font_size));
    }

    if !options.wrap {
        return Ok(lines);
    }
    let mut wrapped = Vec::with_capacity(lines.len());
    for line in lines {
        wrapped.extend(wrap::wrap_line(rasterizer, line, options.paper_width_dots)?);
    }
    Ok(wrapped)
}

/// Render receipt text into a single buffer.
pub fn compose(
    text: &str,
    options: &RenderOptions,
    rasterizer: &dyn TextRasterizer,
) -> Result<PixelBuffer> {
    let width = options.paper_width_dots;
    let lines = layout(text, options, rasterizer)?;

    let rendered = lines
        .iter()
        .map(|line| render_line(rasterizer, line, width))
        .collect::<Result<Vec<_>>>()?;
    let buffer = PixelBuffer::stack(width, rendered)?;

    log::debug!(
        "composed {} lines into {}x{}",
        lines.len(),
        buffer.width(),
        buffer.height()
    );
    Ok(buffer)
}
