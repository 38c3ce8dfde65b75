//! # Rendering
//!
//! Text in, 1-bit raster out.
//!
//! ## Modules
//!
//! - [`raster`]: [`PixelBuffer`](raster::PixelBuffer), the darkness canvas
//! - [`font`]: the [`TextRasterizer`](font::TextRasterizer) trait and the bundled fonts
//! - [`line`]: one [`StyledLine`](line::StyledLine) → one paper-wide strip
//! - [`compose`]: every line of a receipt stacked into one buffer
//! - [`dither`]: darkness → dots (threshold by default)
//! - [`pack`]: dots → MSB-first bytes
//!
//! ## Usage Example
//!
//! ```
//! use bluberry::printer::RenderOptions;
//! use bluberry::render::{compose::compose, font::BitmapFont, pack::pack};
//!
//! let options = RenderOptions::default();
//! let buffer = compose("<center>HELLO", &options, &BitmapFont::new()).unwrap();
//! let packed = pack(&buffer, options.threshold, options.dithering).unwrap();
//!
//! assert_eq!(packed.width_bytes, 48);
//! assert_eq!(packed.data.len(), 48 * packed.height_rows);
//! ```

pub mod compose;
pub mod dither;
pub mod font;
pub mod line;
pub mod pack;
pub mod raster;
