use service_core::error::AppError;
use service_core::ocr::OcrError;
use thiserror::Error;

/// Failures of the `/scan-medicine` pipeline, one variant per stage.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("No image provided")]
    MissingImage,

    #[error("Image exceeds the upload size limit")]
    TooLarge,

    #[error("Invalid image format")]
    InvalidImage(#[source] image::ImageError),

    #[error("No matching medicines found")]
    NoMatch,

    #[error("{0}")]
    Ocr(#[from] OcrError),

    #[error("image processing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ScanError {
    pub fn outcome(&self) -> &'static str {
        match self {
            ScanError::MissingImage => "missing_image",
            ScanError::TooLarge => "too_large",
            ScanError::InvalidImage(_) => "invalid_image",
            ScanError::NoMatch => "no_match",
            ScanError::Ocr(_) => "ocr_error",
            ScanError::Task(_) => "internal_error",
        }
    }
}

impl From<ScanError> for AppError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::MissingImage | ScanError::InvalidImage(_) => {
                AppError::BadRequest(anyhow::anyhow!(err.to_string()))
            }
            ScanError::TooLarge => AppError::PayloadTooLarge(anyhow::anyhow!(err.to_string())),
            ScanError::NoMatch => AppError::NotFound(anyhow::anyhow!(err.to_string())),
            ScanError::Ocr(_) | ScanError::Task(_) => {
                AppError::InternalError(anyhow::anyhow!("Processing error: {}", err))
            }
        }
    }
}
