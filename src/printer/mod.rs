//! # Printer Module
//!
//! Printer presets and per-invocation render options.
//!
//! - [`config`]: Paper presets and [`RenderOptions`]

pub mod config;

pub use config::{PrinterConfig, RenderOptions};
