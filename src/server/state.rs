//! Server state and configuration.

use std::sync::Arc;

use crate::printer::config::RenderOptions;
use crate::render::font::TextRasterizer;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Path to the printer device (e.g., "/dev/rfcomm0")
    pub device_path: String,
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Options used when a request carries none.
    pub options: RenderOptions,
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    /// Font shared by every request.
    pub rasterizer: Arc<dyn TextRasterizer>,
}

impl AppState {
    pub fn new(config: ServerConfig, rasterizer: Arc<dyn TextRasterizer>) -> Self {
        Self { config, rasterizer }
    }
}
