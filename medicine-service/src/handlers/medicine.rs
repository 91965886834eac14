use crate::models::{MedicineDetail, MedicineSummary, ScanResponse};
use crate::services::{preprocessing, record_lookup, record_ocr, record_scan, tokenize, ScanError};
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, Path, State,
    },
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use std::time::Instant;

const IMAGE_FIELD: &str = "image";

/// `POST /scan-medicine`: OCR an uploaded package photo and list catalog
/// entries whose names contain any recognized word.
#[tracing::instrument(skip(state, multipart))]
pub async fn scan_medicine(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ScanResponse>, AppError> {
    match scan(&state, multipart).await {
        Ok(medicines) => {
            record_scan("matched");
            tracing::info!(matches = medicines.len(), "Medicine scan matched");
            Ok(Json(ScanResponse { medicines }))
        }
        Err(e) => {
            record_scan(e.outcome());
            Err(e.into())
        }
    }
}

async fn scan(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Vec<MedicineSummary>, ScanError> {
    let multipart = multipart.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Request is not a multipart upload");
        ScanError::MissingImage
    })?;
    let bytes = read_image_field(multipart).await?;

    tracing::debug!(size = bytes.len(), "Image uploaded, normalizing");

    let normalized = tokio::task::spawn_blocking(move || {
        preprocessing::decode(&bytes)
            .map(|image| preprocessing::normalize(&image))
            .map_err(ScanError::InvalidImage)
    })
    .await??;

    let started = Instant::now();
    let result = state.ocr.recognize(&normalized).await;
    record_ocr(if result.is_ok() { "ok" } else { "error" }, started.elapsed());
    let text = result?;

    let tokens = tokenize(&text);
    tracing::debug!(tokens = tokens.len(), "OCR text tokenized");

    let medicines = state.catalog.match_tokens(&tokens);
    if medicines.is_empty() {
        return Err(ScanError::NoMatch);
    }

    Ok(medicines)
}

/// Returns the bytes of the first `image` field.
async fn read_image_field(mut multipart: Multipart) -> Result<Bytes, ScanError> {
    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() == Some(IMAGE_FIELD) {
            return field.bytes().await.map_err(upload_error);
        }
    }

    Err(ScanError::MissingImage)
}

/// An unreadable form counts as having no image, except when the body
/// limit cut it short.
fn upload_error(err: MultipartError) -> ScanError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ScanError::TooLarge
    } else {
        tracing::debug!(error = %err.body_text(), "Unreadable multipart upload");
        ScanError::MissingImage
    }
}

/// `GET /medicine/:id`: exact identifier lookup.
#[tracing::instrument(skip(state))]
pub async fn get_medicine(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MedicineDetail>, AppError> {
    match state.catalog.find_by_id(&id) {
        Some(record) => {
            record_lookup("found");
            Ok(Json(MedicineDetail::from(record)))
        }
        None => {
            record_lookup("not_found");
            Err(AppError::not_found("Medicine not found"))
        }
    }
}
