//! # HTTP Server for Receipt Printing
//!
//! Lets a phone app or a web page hand receipt text to a printer attached
//! to this machine.
//!
//! ## Usage
//!
//! ```bash
//! bluberry serve --listen 0.0.0.0:8080 --device /dev/rfcomm0
//! ```
//!
//! | Route | Response |
//! |-------|----------|
//! | `POST /api/render` | `{"width_bytes", "height_rows", "hex"}` |
//! | `POST /api/preview` | `image/png` |
//! | `POST /api/print` | prints, then `{"success": true, ...}` |

mod handlers;
mod state;

pub use handlers::receipt::{ReceiptRequest, RenderResponse};
pub use state::ServerConfig;

use axum::{Router, routing::post};
use std::sync::Arc;

use crate::error::BluberryError;
use crate::render::font::TextRasterizer;
use state::AppState;

/// Build the router. Split from [`serve`] so it can be mounted elsewhere.
pub fn router(config: ServerConfig, rasterizer: Arc<dyn TextRasterizer>) -> Router {
    let app_state = Arc::new(AppState::new(config, rasterizer));

    Router::new()
        .route("/api/render", post(handlers::receipt::render_hex))
        .route("/api/preview", post(handlers::receipt::preview))
        .route("/api/print", post(handlers::receipt::print))
        .with_state(app_state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use std::sync::Arc;
/// use bluberry::printer::RenderOptions;
/// use bluberry::render::font::BitmapFont;
/// use bluberry::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), bluberry::error::BluberryError> {
/// let config = ServerConfig {
///     device_path: "/dev/rfcomm0".to_string(),
///     listen_addr: "0.0.0.0:8080".to_string(),
///     options: RenderOptions::default(),
/// };
///
/// serve(config, Arc::new(BitmapFont::new())).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(
    config: ServerConfig,
    rasterizer: Arc<dyn TextRasterizer>,
) -> Result<(), BluberryError> {
    config.options.validate()?;
    let listen_addr = config.listen_addr.clone();

    log::info!("listening on {}", listen_addr);
    log::info!("printer device: {}", config.device_path);

    let app = router(config, rasterizer);
    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .map_err(|e| {
            BluberryError::Transport(format!("Failed to bind to {}: {}", listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| BluberryError::Transport(format!("Server error: {}", e)))?;

    Ok(())
}
