//! # Receipt Text
//!
//! Everything that happens to receipt text before it becomes pixels.
//!
//! - [`markup`]: style-tag grammar, text → [`StyledLine`](crate::render::line::StyledLine)s
//! - [`wrap`]: optional greedy word wrap
//! - [`samples`]: ready-made receipts for trying a printer

pub mod markup;
pub mod samples;
pub mod wrap;

pub use markup::parse;
pub use wrap::wrap_line;
