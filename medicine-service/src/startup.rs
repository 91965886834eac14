use crate::config::MedicineConfig;
use crate::handlers;
use crate::services::MedicineCatalog;
use axum::{
    extract::DefaultBodyLimit,
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

/// Shared, read-only request context.
#[derive(Clone)]
pub struct AppState {
    pub config: MedicineConfig,
    pub catalog: Arc<MedicineCatalog>,
    pub ocr: Arc<dyn OcrEngine>,
}

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.upload.max_upload_bytes;

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .route(
            "/scan-medicine",
            post(handlers::scan_medicine).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/medicine/:id", get(handlers::get_medicine))
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
    state: AppState,
}

impl Application {
    pub async fn build(config: MedicineConfig) -> Result<Self, AppError> {
        let catalog = MedicineCatalog::load(&config.catalog.path).map_err(|e| {
            tracing::error!("Failed to load medicine catalog: {}", e);
            AppError::ConfigError(anyhow::Error::new(e))
        })?;
        let ocr = config.ocr.build_engine();

        Self::build_with(config, catalog, ocr).await
    }

    /// Builds the server around an already loaded catalog and OCR engine.
    pub async fn build_with(
        config: MedicineConfig,
        catalog: MedicineCatalog,
        ocr: Arc<dyn OcrEngine>,
    ) -> Result<Self, AppError> {
        if catalog.is_empty() {
            tracing::warn!("Medicine catalog is empty; scans will never match");
        }

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let state = AppState {
            config,
            catalog: Arc::new(catalog),
            ocr,
        };
        let app = build_router(state.clone());

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
            state,
        })
    }

    pub fn catalog(&self) -> &MedicineCatalog {
        &self.state.catalog
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
