//! # Error Types
//!
//! Every stage of the pipeline reports failures through [`BluberryError`].
//! The variant tells the caller which stage gave up; the message says why.

use thiserror::Error;

/// Main error type for bluberry operations
#[derive(Debug, Error)]
pub enum BluberryError {
    /// Font loading, metrics, or an invalid size/width handed to the rasterizer
    #[error("Rasterization error: {0}")]
    Rasterization(String),

    /// Invalid buffer dimensions entering the packer, or malformed hex input
    #[error("Format error: {0}")]
    Format(String),

    /// Invalid render options (paper width, threshold, font size)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transport-level errors (connection, I/O)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Image encoding error (PNG previews)
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BluberryError>;
