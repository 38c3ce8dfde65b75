//! # Printer Protocols
//!
//! Byte builders for the commands a raster receipt needs.
//!
//! - [`commands`]: init, feed, cut
//! - [`graphics`]: raster image envelopes (ESC/POS `GS v 0`, StarPRNT `ESC GS S`)
//!
//! ## Usage Example
//!
//! ```
//! use bluberry::protocol::{commands, graphics::{self, CommandSet}};
//!
//! let mut job = commands::init();
//! job.extend(graphics::gs_v0_raster(48, 24, &[0u8; 48 * 24]));
//! job.extend(commands::feed(CommandSet::EscPos, 96));
//! job.extend(commands::cut(CommandSet::EscPos));
//!
//! assert_eq!(&job[..2], &[0x1B, 0x40]);
//! assert_eq!(&job[job.len() - 3..], &[0x1D, 0x56, 0x00]);
//! ```

pub mod commands;
pub mod graphics;

pub use graphics::CommandSet;
