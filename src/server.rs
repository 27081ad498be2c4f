//! The HTTP surface: fetch a voucher, render it, answer with the PDF.

use crate::store::{FetchError, VoucherSource};
use crate::voucher::render_voucher_pdf;
use crate::PDFError;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, FixedOffset, Local};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::signal;
use tower_http::cors::CorsLayer;

/// Body of every error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Render(#[from] PDFError),

    #[error("render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            ApiError::Fetch(FetchError::NotFound(id)) => {
                log::info!("voucher {id:?} not found");
                (StatusCode::NOT_FOUND, "Voucher não encontrado")
            }
            ApiError::Fetch(e) => {
                log::error!("failed to fetch voucher: {e}");
                (StatusCode::BAD_GATEWAY, "Erro ao buscar voucher")
            }
            ApiError::Render(e) => {
                log::error!("failed to render voucher: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao gerar PDF")
            }
            ApiError::Task(e) => {
                log::error!("{e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao gerar PDF")
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
        });
        (status, body).into_response()
    }
}

/// Shared by every request; the source is the only state there is
pub struct AppState<S> {
    source: Arc<S>,
    clock: fn() -> DateTime<FixedOffset>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        AppState {
            source: Arc::clone(&self.source),
            clock: self.clock,
        }
    }
}

fn local_now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// Builds the router around a voucher source, using the local clock for the
/// "generated at" line
pub fn router<S: VoucherSource + 'static>(source: S) -> Router {
    router_with_clock(source, local_now)
}

/// Like [router], but with the time printed on vouchers taken from `clock`
pub fn router_with_clock<S: VoucherSource + 'static>(
    source: S,
    clock: fn() -> DateTime<FixedOffset>,
) -> Router {
    let state = AppState {
        source: Arc::new(source),
        clock,
    };

    Router::new()
        .route("/", get(index))
        .route("/vouchers/:id/pdf", get(voucher_pdf::<S>))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn index() -> &'static str {
    "API de vouchers online"
}

async fn voucher_pdf<S: VoucherSource + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let voucher = state.source.fetch_voucher(&id).await?;
    let now = (state.clock)();

    let pdf = tokio::task::spawn_blocking(move || {
        let mut bytes: Vec<u8> = Vec::new();
        render_voucher_pdf(&voucher, &mut bytes, now).map(|_| bytes)
    })
    .await??;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "inline; filename=voucher.pdf"),
        ],
        pdf,
    )
        .into_response())
}

/// Serves the router on all interfaces until Ctrl+C or SIGTERM
pub async fn run_server<S: VoucherSource + 'static>(source: S, port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("voucher server listening on {addr}");

    axum::serve(listener, router(source))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                log::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => log::info!("received Ctrl+C, shutting down"),
        _ = terminate => log::info!("received SIGTERM, shutting down"),
    }
}
