//! # Bluberry - Receipt Text to Thermal Printer Raster
//!
//! Bluberry turns structured receipt text into the 1-bit raster images
//! that Bluetooth thermal receipt printers print. It provides:
//!
//! - **Markup**: alignment, bold and size tags per line
//! - **Rendering**: built-in bitmap font or any TTF, laid out to the paper width
//! - **Packing**: MSB-first rows, threshold or dithered
//! - **Encoding**: raw bytes, hex text, or complete ESC/POS / StarPRNT jobs
//! - **Transport**: Bluetooth RFCOMM communication
//!
//! ## Quick Start
//!
//! ```no_run
//! use bluberry::{
//!     pipeline::{print_job, render_receipt},
//!     printer::{PrinterConfig, RenderOptions},
//!     render::font::BitmapFont,
//!     transport::{BluetoothTransport, Transport},
//! };
//!
//! let options = RenderOptions::for_printer(&PrinterConfig::PAPER_58MM);
//! let text = "<center><large><b>CORNER CAFE\n\
//!             Americano x2      6,000\n\
//!             <right><b>Total: 6,000";
//!
//! let bitmap = render_receipt(text, &options, &BitmapFont::new())?;
//! let job = print_job(&bitmap, &options)?;
//!
//! let mut transport = BluetoothTransport::open("/dev/rfcomm0")?;
//! transport.write_all(&job)?;
//!
//! # Ok::<(), bluberry::error::BluberryError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`receipt`] | Markup parsing, word wrap, sample receipts |
//! | [`render`] | Fonts, line layout, compositing, dithering, packing |
//! | [`codec`] | Hex encoding |
//! | [`protocol`] | ESC/POS and StarPRNT command builders |
//! | [`pipeline`] | Text → bytes / hex / print job in one call |
//! | [`transport`] | Communication backends |
//! | [`server`] | HTTP API |
//! | [`printer`] | Paper presets and render options |
//! | [`error`] | Error types |

pub mod codec;
pub mod error;
pub mod pipeline;
pub mod printer;
pub mod protocol;
pub mod receipt;
pub mod render;
pub mod server;
pub mod transport;

// Re-exports for convenience
pub use error::BluberryError;
pub use pipeline::{Pipeline, parse_receipt_text, parse_receipt_text_hex, render_receipt};
pub use printer::{PrinterConfig, RenderOptions};
pub use transport::BluetoothTransport;
