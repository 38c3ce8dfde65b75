//! Receipt render, preview and print handlers.
//!
//! Every endpoint takes the same JSON body:
//!
//! ```json
//! { "text": "<center><b>CORNER CAFE\nAmericano  3,000", "options": { "paper_width_dots": 576 } }
//! ```
//!
//! `options` is optional and replaces the server's defaults as a whole
//! (missing keys inside it take the crate defaults).

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::codec::hex::to_hex;
use crate::error::BluberryError;
use crate::pipeline::{print_job, render_receipt};
use crate::printer::config::RenderOptions;
use crate::render::pack::PackedBitmap;
use crate::transport::{BluetoothTransport, Transport};

use super::super::state::AppState;

/// Request body shared by all receipt endpoints.
#[derive(Debug, Deserialize)]
pub struct ReceiptRequest {
    pub text: String,
    #[serde(default)]
    pub options: Option<RenderOptions>,
}

/// Response of `POST /api/render`.
#[derive(Debug, Serialize, PartialEq)]
pub struct RenderResponse {
    pub width_bytes: usize,
    pub height_rows: usize,
    pub hex: String,
}

type HandlerError = (StatusCode, Json<serde_json::Value>);

/// Caller mistakes are 400, everything else 500.
fn status_for(err: &BluberryError) -> StatusCode {
    match err {
        BluberryError::Configuration(_)
        | BluberryError::Format(_)
        | BluberryError::Rasterization(_) => StatusCode::BAD_REQUEST,
        BluberryError::Transport(_) | BluberryError::Image(_) | BluberryError::Io(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_response(err: BluberryError) -> HandlerError {
    log::warn!("request failed: {}", err);
    (
        status_for(&err),
        Json(serde_json::json!({"success": false, "error": err.to_string()})),
    )
}

fn task_error(err: tokio::task::JoinError) -> HandlerError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"success": false, "error": format!("Task error: {}", err)})),
    )
}

/// Resolve request options against the server defaults.
fn options_for(state: &AppState, request: &ReceiptRequest) -> RenderOptions {
    request
        .options
        .clone()
        .unwrap_or_else(|| state.config.options.clone())
}

/// Render on a blocking thread; text layout is CPU-bound.
async fn render(
    state: Arc<AppState>,
    request: ReceiptRequest,
) -> Result<(PackedBitmap, RenderOptions), HandlerError> {
    let options = options_for(&state, &request);
    tokio::task::spawn_blocking(move || {
        render_receipt(&request.text, &options, state.rasterizer.as_ref()).map(|b| (b, options))
    })
    .await
    .map_err(task_error)?
    .map_err(error_response)
}

/// Handle POST /api/render - packed bitmap as hex.
pub async fn render_hex(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReceiptRequest>,
) -> Result<Json<RenderResponse>, HandlerError> {
    let (bitmap, options) = render(state, request).await?;
    Ok(Json(RenderResponse {
        width_bytes: bitmap.width_bytes,
        height_rows: bitmap.height_rows,
        hex: to_hex(&bitmap.data, options.hex_case),
    }))
}

/// Handle POST /api/preview - PNG of the dots that would print.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReceiptRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let (bitmap, _) = render(state, request).await?;
    let png_bytes = bitmap.to_png().map_err(error_response)?;
    Ok(([(header::CONTENT_TYPE, "image/png")], png_bytes))
}

/// Handle POST /api/print - send a full job to the printer.
pub async fn print(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReceiptRequest>,
) -> Result<Json<serde_json::Value>, HandlerError> {
    let device_path = state.config.device_path.clone();
    let (bitmap, options) = render(state, request).await?;
    let job = print_job(&bitmap, &options).map_err(error_response)?;
    let sent = job.len();

    tokio::task::spawn_blocking(move || print_to_device(&device_path, &job))
        .await
        .map_err(task_error)?
        .map_err(error_response)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "bytes": sent,
        "height_rows": bitmap.height_rows,
    })))
}

/// Print to the physical device.
fn print_to_device(device_path: &str, data: &[u8]) -> crate::error::Result<()> {
    let mut transport = BluetoothTransport::open(device_path)?;
    transport.write_all(data)
}
