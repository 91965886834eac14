use super::FetchError;
use service_core::error::AppError;
use service_core::ocr::OcrError;
use thiserror::Error;

/// Client-facing message for every acquisition failure.
pub const FETCH_FAILED_MESSAGE: &str = "Unable to fetch image from URL";

/// Failures of the `/process-image` pipeline, one variant per stage.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("No image URL provided")]
    MissingImage,

    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    Decode(#[from] image::ImageError),

    #[error("{0}")]
    Ocr(#[from] OcrError),

    #[error("Image processing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::MissingImage | ExtractionError::Fetch(_) => {
                tracing::warn!(error = %err, "Image acquisition failed");
                AppError::bad_request(FETCH_FAILED_MESSAGE)
            }
            other => AppError::InternalError(anyhow::anyhow!(other.to_string())),
        }
    }
}
