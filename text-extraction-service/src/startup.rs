use crate::config::TextExtractionConfig;
use crate::handlers;
use crate::services::ImageFetcher;
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics_middleware, request_id_middleware, security_headers_middleware,
};
use service_core::ocr::OcrEngine;
use service_core::shutdown::shutdown_signal;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: TextExtractionConfig,
    pub fetcher: ImageFetcher,
    pub ocr: Arc<dyn OcrEngine>,
}

impl AppState {
    pub fn new(config: TextExtractionConfig, ocr: Arc<dyn OcrEngine>) -> Result<Self, AppError> {
        let fetcher = ImageFetcher::new(&config.fetch).map_err(|e| {
            tracing::error!("Failed to build HTTP client: {}", e);
            AppError::InternalError(anyhow::Error::new(e))
        })?;

        Ok(Self {
            config,
            fetcher,
            ocr,
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .route("/process-image", post(handlers::process_image))
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: TextExtractionConfig) -> Result<Self, AppError> {
        let ocr = config.ocr.build_engine();
        Self::build_with_engine(config, ocr).await
    }

    /// Builds the server around an explicit OCR engine.
    pub async fn build_with_engine(
        config: TextExtractionConfig,
        ocr: Arc<dyn OcrEngine>,
    ) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let state = AppState::new(config, ocr)?;
        let app = build_router(state);

        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
