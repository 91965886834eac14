use crate::dtos::{ProcessImageRequest, ProcessImageResponse};
use crate::services::{preprocessing, record_fetch, record_ocr, ExtractionError};
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use service_core::error::AppError;
use std::time::Instant;

/// `POST /process-image`: fetch → normalize → OCR, text returned verbatim.
#[tracing::instrument(skip(state, payload))]
pub async fn process_image(
    State(state): State<AppState>,
    payload: Result<Json<ProcessImageRequest>, JsonRejection>,
) -> Result<Json<ProcessImageResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

    let text = extract_text(&state, request).await?;

    Ok(Json(ProcessImageResponse { text }))
}

async fn extract_text(
    state: &AppState,
    request: ProcessImageRequest,
) -> Result<String, ExtractionError> {
    let url = request
        .image
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or(ExtractionError::MissingImage)?;

    let bytes = match state.fetcher.fetch(url).await {
        Ok(bytes) => {
            record_fetch("ok");
            bytes
        }
        Err(e) => {
            record_fetch(e.outcome());
            return Err(e.into());
        }
    };

    tracing::info!(size = bytes.len(), "Image fetched, normalizing");

    let normalized =
        tokio::task::spawn_blocking(move || preprocessing::normalize(&bytes)).await??;

    let started = Instant::now();
    let result = state.ocr.recognize(&normalized).await;
    record_ocr(if result.is_ok() { "ok" } else { "error" }, started.elapsed());
    let text = result?;

    tracing::info!(
        engine = state.ocr.name(),
        chars = text.chars().count(),
        "Text extracted"
    );

    Ok(text)
}
